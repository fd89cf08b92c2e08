//! CopyQ extraction script generation.
//!
//! CopyQ exposes its history through an embedded JavaScript dialect
//! (`copyq eval -` reads a program on stdin). The dialect can only print raw
//! text, so the generated program frames every non-empty item between a
//! sentinel line and the item body, each followed by a single separator;
//! [`crate::record`] undoes the framing on the way back in.
//!
//! The sentinel must not collide with clipboard content; the orchestrator
//! passes a freshly generated UUID per run. Generation is a pure function
//! of its inputs.

/// Render the item-extraction program for one tab.
///
/// The program selects `tab`, then walks item indices from the current item
/// count down to 1 (newest first), reading each item's `text/plain`
/// representation and printing `sentinel`-framed bodies for the non-empty
/// ones. Empty items produce no output at all.
pub fn extraction_script(tab: &str, sentinel: &str) -> String {
    format!(
        r#"const MIME = 'text/plain';
const SEP = '\n';

tab('{tab}');

const count = size();

for (let row = count; row >= 1; --row) {{
  const item = str(read(MIME, row));

  if (item) {{
    print('{sentinel}' + SEP);
    print(item + SEP);
  }}
}}
"#
    )
}
