/// Render a candidate sequence into Bash's reply-assignment syntax.
///
/// An empty candidate sequence renders to the empty string, never to `COMPREPLY=()`;
/// emitting an explicit empty array would clobber `COMPREPLY` when the generator
/// holds no opinion.
pub(crate) fn render(candidates: &[String]) -> String {
    if candidates.is_empty() {
        return String::default();
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|candidate| format!("'{candidate}'"))
        .collect();

    format!("COMPREPLY=({})", items.join(" "))
}
