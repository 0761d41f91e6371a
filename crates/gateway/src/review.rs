//! Review prompt synthesis from pull-request data.

use std::fmt::Write as _;

use proto::PrData;

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_FILE: &str = "unknown";
const NO_DIFF: &str = "No diff available";

/// Builds the review prompt: PR metadata followed by one `--- file ---`
/// block per changed file, in payload order.
pub fn build_review_prompt(pr: &PrData) -> String {
    let mut context = String::new();
    let _ = write!(
        context,
        "\nPR Title: {}\nAuthor: {}\nDescription: {}\n\nFiles Changed ({} files):\n",
        pr.title.as_deref().unwrap_or(NOT_AVAILABLE),
        pr.author.as_deref().unwrap_or(NOT_AVAILABLE),
        pr.description.as_deref().unwrap_or(NOT_AVAILABLE),
        pr.files.len(),
    );

    for file in &pr.files {
        let _ = write!(
            context,
            "\n--- {} ---\n",
            file.filename.as_deref().unwrap_or(UNKNOWN_FILE)
        );
        context.push_str(file.patch.as_deref().unwrap_or(NO_DIFF));
        context.push('\n');
    }

    format!("Please review this pull request:\n\n{context}")
}
