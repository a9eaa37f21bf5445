/// Trim a user supplied label, treating blank text as absent.
pub(super) fn sanitize_label(label: Option<String>) -> Option<String> {
    label
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
}
