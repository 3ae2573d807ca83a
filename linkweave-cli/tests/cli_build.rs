use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const TEMPLATE: &str = r#"<h1>{{ Title }}</h1>
{{ Body }}
<ul>{% for link in Incoming %}<li><a href="{{ link.Href }}">{{ link.Name }}</a></li>{% endfor %}</ul>
"#;

fn linkweave() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("linkweave").unwrap()
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn build_renders_links_and_backlinks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("notes");
    let dst = dir.path().join("site");
    let tpl = dir.path().join("page.tpl");

    write(&src.join("A.md"), "see [[B]]");
    write(&src.join("B.md"), "hello");
    write(&tpl, TEMPLATE);

    linkweave()
        .arg("--src")
        .arg(&src)
        .arg("--dst")
        .arg(&dst)
        .arg("--tpl")
        .arg(&tpl)
        .assert()
        .success();

    let a = fs::read_to_string(dst.join("A.html"))?;
    assert!(a.contains(r#"<a href="./B.html">B</a>"#));
    assert!(a.contains("<ul></ul>"));

    let b = fs::read_to_string(dst.join("B.html"))?;
    assert!(b.contains("<h1>B</h1>"));
    assert!(b.contains(r#"<li><a href="A.html">A</a></li>"#));
    Ok(())
}

#[test]
fn go_style_flags_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("notes");
    let dst = dir.path().join("site");
    let tpl = dir.path().join("page.tpl");

    write(&src.join("sub/My Note.md"), "[[Nowhere]]");
    write(&tpl, "{{ Body }}");

    linkweave()
        .arg("-src")
        .arg(&src)
        .arg("-dst")
        .arg(&dst)
        .arg("-tpl")
        .arg(&tpl)
        .assert()
        .success();

    let page = fs::read_to_string(dst.join("sub/My-Note.html"))?;
    assert!(page.contains(r##"<a href="#">Nowhere</a>"##));
    Ok(())
}

#[test]
fn missing_template_flag_fails_before_touching_destination() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempdir()?;
    let src = dir.path().join("notes");
    let dst = dir.path().join("site");
    write(&src.join("A.md"), "a");
    write(&dst.join("keep.txt"), "still here");

    linkweave()
        .arg("--src")
        .arg(&src)
        .arg("--dst")
        .arg(&dst)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing -tpl"));

    assert!(dst.join("keep.txt").exists());
    Ok(())
}

#[test]
fn stale_output_is_removed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("notes");
    let dst = dir.path().join("site");
    let tpl = dir.path().join("page.tpl");
    fs::create_dir_all(&src)?;
    write(&dst.join("old.html"), "stale");
    write(&tpl, "{{ Title }}");

    linkweave()
        .arg("--src")
        .arg(&src)
        .arg("--dst")
        .arg(&dst)
        .arg("--tpl")
        .arg(&tpl)
        .assert()
        .success();

    assert!(dst.is_dir());
    assert_eq!(fs::read_dir(&dst)?.count(), 0);
    Ok(())
}

#[test]
fn missing_source_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let tpl = dir.path().join("page.tpl");
    write(&tpl, "{{ Title }}");

    linkweave()
        .arg("--src")
        .arg(dir.path().join("nope"))
        .arg("--dst")
        .arg(dir.path().join("site"))
        .arg("--tpl")
        .arg(&tpl)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load notes"));
    Ok(())
}

#[test]
fn bad_template_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let src = dir.path().join("notes");
    let tpl = dir.path().join("page.tpl");
    write(&src.join("A.md"), "a");
    write(&tpl, "{% for x in %}");

    linkweave()
        .arg("--src")
        .arg(&src)
        .arg("--dst")
        .arg(dir.path().join("site"))
        .arg("--tpl")
        .arg(&tpl)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load template"));
    Ok(())
}

#[test]
fn config_file_supplies_paths() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(&dir.path().join("notes/A.md"), "![[pic]]");
    write(&dir.path().join("notes/pic.png"), "PNG");
    write(&dir.path().join("page.tpl"), "{{ Body }}");
    write(
        &dir.path().join("linkweave.yml"),
        r#"
paths:
  source: notes
  output: site
  template: page.tpl
"#,
    );

    linkweave()
        .arg("-config")
        .arg(dir.path().join("linkweave.yml"))
        .assert()
        .success();

    let site = dir.path().join("site");
    assert!(site.join("A.html").exists());
    assert_eq!(fs::read(site.join("pic.png"))?, b"PNG");
    Ok(())
}
