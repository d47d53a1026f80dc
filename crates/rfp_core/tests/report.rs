use pretty_assertions::assert_eq;
use rfp_core::report::{client_slug, Report};

#[test]
fn render_keeps_headings_in_insertion_order() {
    let mut report = Report::new();
    report.add_section("RFP Analysis for Acme", 1, "Acme");
    report.add_section("Client Description", 2, "Makes anvils.");
    report.add_section("Use Cases", 2, "1. Logistics");

    let rendered = report.render();
    let first = rendered.find("# RFP Analysis for Acme").expect("title");
    let second = rendered.find("## Client Description").expect("description");
    let third = rendered.find("## Use Cases").expect("use cases");
    assert!(first < second && second < third);
    assert!(rendered.contains("Makes anvils."));
}

#[test]
fn render_clamps_heading_depth() {
    let mut report = Report::new();
    report.add_section("Too deep", 9, "body");
    assert!(report.render().starts_with("###### Too deep"));
}

#[test]
fn empty_body_renders_heading_only() {
    let mut report = Report::new();
    report.add_section("Bare", 2, "");
    assert_eq!(report.render(), "## Bare\n\n");
}

#[test]
fn persist_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("out").join("analysis.md");

    let mut report = Report::new();
    report.add_section("RFP Analysis for Acme", 1, "Acme");
    report.add_section("Proposal Summary", 2, "A summary.");
    report.persist(&path).expect("persist");

    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.contains("# RFP Analysis for Acme"));
    assert!(written.contains("## Proposal Summary"));
}

#[test]
fn persist_surfaces_io_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    // The target path is an existing directory, so the write must fail.
    let err = Report::new().persist(dir.path()).expect_err("should fail");
    assert_eq!(err.code, "IO_REPORT_WRITE_FAILED");
}

#[test]
fn client_slug_normalizes_names() {
    assert_eq!(client_slug("Acme Corp, Inc."), "acme_corp_inc");
    assert_eq!(client_slug("  Fuel  Talent  "), "fuel_talent");
    assert_eq!(client_slug("A1 Robotics"), "a1_robotics");
    assert_eq!(client_slug("!!!"), "client");
    assert_eq!(client_slug(""), "client");
}
