mod common;

use common::StubProbe;
use natla::native::{dge, fv};
use natla::{init_with, BackendKind, ElementType, Error, LoaderConfig, Registry, Shape};

fn setup() -> &'static Registry {
    match init_with(&LoaderConfig::default(), &StubProbe::bare()) {
        Ok(registry) => registry,
        Err(Error::AlreadyInitialized { .. }) => natla::registry().unwrap(),
        Err(e) => panic!("initialization failed: {e}"),
    }
}

#[test]
fn test_selection_succeeds_without_engines() {
    let registry = setup();
    assert_eq!(registry.backend(), BackendKind::None);
    assert!(registry.factories().is_empty());
}

#[test]
fn test_constructors_report_missing_engine() {
    setup();
    assert!(matches!(
        dge(Shape::general(2, 2)),
        Err(Error::EngineUnavailable {
            element_type: Some(ElementType::F64),
            backend: BackendKind::None
        })
    ));
    let err = fv(3usize).unwrap_err();
    assert!(err.to_string().contains("float32"));
}

#[test]
fn test_dispatch_and_threading_report_missing_engine() {
    setup();
    assert!(matches!(
        natla::resolve("int16"),
        Err(Error::EngineUnavailable { .. })
    ));
    assert!(matches!(
        natla::resolve("int128"),
        Err(Error::UnsupportedType { .. })
    ));
    assert!(matches!(
        natla::set_threading(true),
        Err(Error::EngineUnavailable {
            element_type: None,
            ..
        })
    ));
}

#[cfg(feature = "mmap")]
#[test]
fn test_fmap_reports_missing_engine() {
    setup();
    let file = tempfile::NamedTempFile::new().unwrap();
    let result = natla::fmap(file.path(), natla::MapOptions::new());
    assert!(matches!(result, Err(Error::EngineUnavailable { .. })));
}
