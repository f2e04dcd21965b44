use formshape::render::{FieldListRenderer, escape_html, render_results};
use serde_json::json;

#[test]
fn empty_results_render_no_results_text() {
    let renderer = FieldListRenderer::new().with_no_results_text("Nothing <here>");
    let html = render_results(&renderer, &[]).unwrap();
    assert_eq!(
        html,
        r#"<div class="formshape-results-container">Nothing &lt;here&gt;</div>"#
    );
}

#[test]
fn each_record_becomes_a_row() {
    let renderer = FieldListRenderer::new().with_field("Title", "title");
    let html = render_results(
        &renderer,
        &[json!({"title": "One"}), json!({"title": "<script>"})],
    )
    .unwrap();

    assert_eq!(html.matches(r#"<div class="row">"#).count(), 2);
    assert!(html.contains("<strong>Title:</strong> One<br>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn escaping_covers_quotes() {
    assert_eq!(escape_html(r#"a"b'c"#), "a&quot;b&#39;c");
}
