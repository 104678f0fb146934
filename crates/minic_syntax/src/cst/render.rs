//! Text rendering of syntax trees.
//!
//! One line per node, depth-first pre-order, using box-drawing prefixes:
//!
//! ```text
//! compilation_unit
//! └── external_declaration
//!     └── declaration
//!         ├── declaration_specifier
//!         │   └── type
//!         │       └── int
//!         └── ;
//! ```

use super::SyntaxNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUE: &str = "│   ";
const BLANK: &str = "    ";

/// Render `root` and every descendant, one node per line, each line terminated by `\n`.
pub fn render(root: &SyntaxNode) -> String {
    let mut out = String::new();
    // (node, prefix of its own line, prefix inherited by its children)
    let mut stack: Vec<(&SyntaxNode, String, String)> = vec![(root, String::new(), String::new())];

    while let Some((node, line_prefix, child_prefix)) = stack.pop() {
        out.push_str(&line_prefix);
        out.push_str(node.symbol());
        out.push('\n');

        let children = node.children();
        let last = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate().rev() {
            let (branch, cont) = if i == last { (LAST_BRANCH, BLANK) } else { (BRANCH, CONTINUE) };
            stack.push((child, format!("{child_prefix}{branch}"), format!("{child_prefix}{cont}")));
        }
    }

    out
}
