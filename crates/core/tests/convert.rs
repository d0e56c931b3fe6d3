mod common;

use std::fs::write;

use common::{FakeEngine, font_info};
use fib_core::{Converter, DryRunRunner, FontEngine, OutputFormat, Settings};
use tempfile::tempdir;

#[test]
fn test_convert_next_to_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo-Bold.ttf");
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Bold"));
    let settings = Settings::default();
    let runner = DryRunRunner::default();
    let converter = Converter::new(&settings, &runner);

    let font = engine.open(&input).unwrap();
    let output = converter.convert(font.as_ref(), OutputFormat::Otf, None).unwrap();

    assert_eq!(output, dir.path().join("Foo-Bold.otf"));
    assert!(output.is_file());
    assert!(runner.commands().is_empty());
}

#[test]
fn test_convert_sfd_uses_save_and_ufo_is_a_directory() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let input = dir.path().join("Foo.otf");
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Regular"));
    let settings = Settings::default();
    let runner = DryRunRunner::default();
    let converter = Converter::new(&settings, &runner);

    let font = engine.open(&input).unwrap();
    let sfd = converter.convert(font.as_ref(), OutputFormat::Sfd, Some(&out)).unwrap();
    let ufo = converter.convert(font.as_ref(), OutputFormat::Ufo, Some(&out)).unwrap();

    assert_eq!(sfd, out.join("Foo.sfd"));
    assert!(sfd.is_file());
    assert_eq!(ufo, out.join("Foo.ufo"));
    assert!(ufo.is_dir());
}

#[test]
fn test_eot_from_non_truetype_removes_intermediate() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo.sfd");
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Regular"));
    let settings = Settings::default();
    let runner = DryRunRunner::default();
    let converter = Converter::new(&settings, &runner);

    let font = engine.open(&input).unwrap();
    let output = converter.convert(font.as_ref(), OutputFormat::Eot, None).unwrap();

    let intermediate = dir.path().join("Foo.ttf");
    assert_eq!(output, dir.path().join("Foo.eot"));
    assert_eq!(engine.generated(), vec![(intermediate.clone(), OutputFormat::Ttf)]);
    assert_eq!(
        runner.commands(),
        vec![format!("ttf2eot {} {}", intermediate.display(), output.display())]
    );
    assert!(!intermediate.exists());
}

#[test]
fn test_eot_intermediate_never_clobbers_existing_ttf() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo.sfd");
    let existing = dir.path().join("Foo.ttf");
    write(&existing, b"keep me").unwrap();
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Regular"));
    let settings = Settings::default();
    let runner = DryRunRunner::default();
    let converter = Converter::new(&settings, &runner);

    let font = engine.open(&input).unwrap();
    converter.convert(font.as_ref(), OutputFormat::Eot, None).unwrap();

    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
    let generated = engine.generated();
    assert_eq!(generated.len(), 1);
    assert!(!generated[0].0.exists());
}

#[test]
fn test_eot_from_truetype_runs_converter_directly() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo.ttf");
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Regular"));
    let settings = Settings { ttf2eot: "/usr/local/bin/ttf2eot".to_string(), ..Settings::default() };
    let runner = DryRunRunner::default();
    let converter = Converter::new(&settings, &runner);

    let font = engine.open(&input).unwrap();
    let output = converter.convert(font.as_ref(), OutputFormat::Eot, None).unwrap();

    assert!(engine.generated().is_empty());
    assert_eq!(
        runner.commands(),
        vec![format!("/usr/local/bin/ttf2eot {} {}", input.display(), output.display())]
    );
}

#[test]
fn test_convert_all_reuses_generated_ttf_for_eot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo.sfd");
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Regular"));
    let settings = Settings::default();
    let runner = DryRunRunner::default();
    let converter = Converter::new(&settings, &runner);

    let font = engine.open(&input).unwrap();
    let outputs = converter
        .convert_all(font.as_ref(), &[OutputFormat::Eot, OutputFormat::Ttf, OutputFormat::Woff], None)
        .unwrap();

    let ttf = dir.path().join("Foo.ttf");
    assert_eq!(
        outputs,
        vec![dir.path().join("Foo.woff"), ttf.clone(), dir.path().join("Foo.eot")]
    );
    assert!(ttf.is_file());
    assert_eq!(engine.generated().len(), 2);
    assert_eq!(runner.commands().len(), 1);
}

#[test]
fn test_failing_converter_is_an_error_only_when_strict() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo.ttf");
    let engine = FakeEngine::default().with_font(&input, font_info("Foo", "Regular"));
    let runner = DryRunRunner::with_status(1);

    let lenient = Settings::default();
    let font = engine.open(&input).unwrap();
    assert!(Converter::new(&lenient, &runner).convert(font.as_ref(), OutputFormat::Eot, None).is_ok());

    let strict = Settings { strict: true, ..Settings::default() };
    assert!(Converter::new(&strict, &runner).convert(font.as_ref(), OutputFormat::Eot, None).is_err());
}
