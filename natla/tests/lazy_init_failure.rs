use natla::native::fv;
use natla::{BackendKind, Error, LoaderConfig};

fn assert_unknown_backend(err: Error) {
    match err {
        Error::UnknownBackend {
            requested,
            supported,
        } => {
            assert_eq!(requested, "cuda");
            assert_eq!(supported, BackendKind::ACCEPTED.to_vec());
        }
        other => panic!("expected UnknownBackend, got {other:?}"),
    }
}

#[test]
fn test_failed_lazy_init_keeps_typed_error() {
    std::env::remove_var(LoaderConfig::CONFIG_VAR);
    std::env::set_var(LoaderConfig::BACKEND_VAR, "cuda");

    assert_unknown_backend(fv(3usize).unwrap_err());
    assert_unknown_backend(fv(3usize).unwrap_err());
    assert_unknown_backend(natla::registry().unwrap_err());

    // The failure is sticky, even once the environment is fixed
    std::env::set_var(LoaderConfig::BACKEND_VAR, "none");
    assert_unknown_backend(natla::registry().unwrap_err());
    assert!(matches!(
        natla::init(&LoaderConfig::default()),
        Err(Error::AlreadyInitialized {
            active: BackendKind::None
        })
    ));
}
