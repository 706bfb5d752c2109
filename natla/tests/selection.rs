mod common;

use common::StubProbe;
use natla::{BackendKind, ElementType, Error, LoaderConfig, ProbeReport, Registry};
use rayon::prelude::*;

#[test]
fn test_auto_probe_prefers_accelerate_on_macos() {
    let probe = StubProbe::new(
        "macos",
        "x86_64",
        &[BackendKind::Accelerate, BackendKind::Mkl, BackendKind::OpenBlas],
    );
    let registry = Registry::load(&LoaderConfig::default(), &probe).unwrap();
    assert_eq!(registry.backend(), BackendKind::Accelerate);
    assert_eq!(probe.attempts(), vec![BackendKind::Accelerate]);
}

#[test]
fn test_auto_probe_falls_through_to_openblas() {
    let probe = StubProbe::new("linux", "amd64", &[BackendKind::OpenBlas]);
    let registry = Registry::load(&LoaderConfig::default(), &probe).unwrap();
    assert_eq!(registry.backend(), BackendKind::OpenBlas);
    // Accelerate is never probed off macOS
    assert_eq!(probe.attempts(), vec![BackendKind::Mkl, BackendKind::OpenBlas]);
}

#[test]
fn test_all_slots_share_the_selected_backend() {
    let probe = StubProbe::new("linux", "x86_64", &[BackendKind::Mkl, BackendKind::OpenBlas]);
    let registry = Registry::load(&LoaderConfig::default(), &probe).unwrap();
    let factories = registry.factories();
    assert_eq!(factories.len(), 6);
    for (factory, ty) in factories.iter().zip(ElementType::ALL) {
        assert_eq!(factory.backend(), BackendKind::Mkl);
        assert_eq!(factory.element_type(), ty);
    }
}

#[test]
fn test_nothing_loadable_binds_no_engines() {
    let probe = StubProbe::bare();
    let registry = Registry::load(&LoaderConfig::default(), &probe).unwrap();
    assert_eq!(registry.backend(), BackendKind::None);
    assert!(registry.engines().is_none());
    assert!(matches!(
        registry.resolve("float64"),
        Err(Error::EngineUnavailable {
            element_type: Some(ElementType::F64),
            backend: BackendKind::None
        })
    ));
}

#[test]
fn test_explicit_request_never_falls_back() {
    let probe = StubProbe::openblas_only();
    let config = LoaderConfig::default().with_backend("mkl");
    match Registry::load(&config, &probe) {
        Err(e @ Error::BackendUnavailable { .. }) => {
            assert!(e.is_configuration());
            assert!(e.to_string().contains("mkl"));
        }
        other => panic!("expected BackendUnavailable, got {other:?}"),
    }
    assert_eq!(probe.attempts(), vec![BackendKind::Mkl]);
}

#[test]
fn test_explicit_request_ignores_platform_gate() {
    let probe = StubProbe::new("linux", "aarch64", &[BackendKind::Accelerate]);
    let config = LoaderConfig::default().with_backend("Apple");
    let registry = Registry::load(&config, &probe).unwrap();
    assert_eq!(registry.backend(), BackendKind::Accelerate);
}

#[test]
fn test_explicit_none() {
    let probe = StubProbe::openblas_only();
    let config = LoaderConfig::default().with_backend("none");
    let registry = Registry::load(&config, &probe).unwrap();
    assert_eq!(registry.backend(), BackendKind::None);
    assert!(probe.attempts().is_empty());
}

#[test]
fn test_unknown_backend_symbol() {
    let probe = StubProbe::openblas_only();
    let config = LoaderConfig::default().with_backend("cuda");
    match Registry::load(&config, &probe) {
        Err(Error::UnknownBackend {
            requested,
            supported,
        }) => {
            assert_eq!(requested, "cuda");
            assert!(supported.contains(&"openblas"));
        }
        other => panic!("expected UnknownBackend, got {other:?}"),
    }
}

#[test]
fn test_concurrent_resolve_is_consistent() {
    let probe = StubProbe::openblas_only();
    let registry = Registry::load(&LoaderConfig::default(), &probe).unwrap();
    let tags = ["float32", "double", "int", "i64", "short", "uint8"];

    let resolved: Vec<_> = (0..512)
        .into_par_iter()
        .map(|i| registry.resolve(tags[i % tags.len()]).unwrap())
        .collect();

    for (i, factory) in resolved.iter().enumerate() {
        let expected = registry.resolve(tags[i % tags.len()]).unwrap();
        assert_eq!(factory, &expected);
        assert_eq!(factory.backend(), BackendKind::OpenBlas);
    }
}

#[test]
fn test_probe_report() {
    let probe = StubProbe::new("linux", "aarch64", &[BackendKind::Mkl, BackendKind::OpenBlas]);
    let report = ProbeReport::collect(&probe);
    assert_eq!(report.backends.len(), 3);
    // MKL loads here but is not auto-probed on aarch64
    assert_eq!(report.auto_selection, BackendKind::OpenBlas);
    let text = report.to_string();
    assert!(text.contains("aarch64"));
    assert!(text.contains("not auto-probed"));
}
