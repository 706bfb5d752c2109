//! Named constructors over the process-wide registry
//!
//! One function per element type and structure kind. The first letter picks
//! the element type and the rest the kind:
//!
//! | prefix | element | | suffix | kind |
//! |---|---|---|---|---|
//! | `f` | `f32` | | `v` | vector |
//! | `d` | `f64` | | `ge`, `tr`, `sy` | general, triangular, symmetric |
//! | `i` | `i32` | | `gb`, `tb`, `sb` | banded |
//! | `l` | `i64` | | `tp`, `sp` | packed |
//! | `s` | `i16` | | `gd` | diagonal |
//! | `b` | `i8` | | `gt`, `dt`, `st` | tridiagonal |
//!
//! Each call resolves the engine for its element type and forwards to the
//! generic constructor in [`crate::structures`]. Errors from the structure
//! layer come back unchanged. With no backend bound every call fails with
//! [`Error::EngineUnavailable`](crate::Error::EngineUnavailable).
//!
//! ```no_run
//! use natla::native::{dge, fv};
//! use natla::{vctr, Shape};
//!
//! let a = dge((Shape::general(2, 2), vec![1.0, 2.0, 3.0, 4.0]))?;
//! let x = vctr!(fv; 1.0, 2.0, 3.0);
//! assert_eq!(x?, fv(vec![1.0, 2.0, 3.0])?);
//! # let _ = a;
//! # Ok::<(), natla::Error>(())
//! ```

use natla_core::StructureKind;

use crate::factory::{Factory, Native};
use crate::registry::registry;
use crate::structures::{self, Args, Matrix, Vector, VectorArgs};
use crate::Result;

/// The process-wide engine for `T`
pub fn engine<T: Native>() -> Result<&'static Factory<T>> {
    registry()?.factory::<T>()
}

macro_rules! native_constructors {
    ($type:ty, $vector:ident; $($name:ident => $kind:ident),* $(,)?) => {
        #[doc = concat!("`", stringify!($type), "` vector from a length, `Vec`, slice or array")]
        pub fn $vector(args: impl Into<VectorArgs<$type>>) -> Result<Vector<$type>> {
            Ok(structures::vctr(engine::<$type>()?, args))
        }

        $(
            #[doc = concat!("`", stringify!($type), "` matrix of kind `", stringify!($kind), "`")]
            pub fn $name(args: impl Into<Args<$type>>) -> Result<Matrix<$type>> {
                structures::structure(engine::<$type>()?, StructureKind::$kind, args)
            }
        )*
    };
}

native_constructors!(f32, fv;
    fge => Ge, ftr => Tr, fsy => Sy, fgb => Gb, ftb => Tb, fsb => Sb,
    ftp => Tp, fsp => Sp, fgd => Gd, fgt => Gt, fdt => Dt, fst => St,
);

native_constructors!(f64, dv;
    dge => Ge, dtr => Tr, dsy => Sy, dgb => Gb, dtb => Tb, dsb => Sb,
    dtp => Tp, dsp => Sp, dgd => Gd, dgt => Gt, ddt => Dt, dst => St,
);

native_constructors!(i32, iv;
    ige => Ge, itr => Tr, isy => Sy, igb => Gb, itb => Tb, isb => Sb,
    itp => Tp, isp => Sp, igd => Gd, igt => Gt, idt => Dt, ist => St,
);

native_constructors!(i64, lv;
    lge => Ge, ltr => Tr, lsy => Sy, lgb => Gb, ltb => Tb, lsb => Sb,
    ltp => Tp, lsp => Sp, lgd => Gd, lgt => Gt, ldt => Dt, lst => St,
);

native_constructors!(i16, sv;
    sge => Ge, str => Tr, ssy => Sy, sgb => Gb, stb => Tb, ssb => Sb,
    stp => Tp, ssp => Sp, sgd => Gd, sgt => Gt, sdt => Dt, sst => St,
);

native_constructors!(i8, bv;
    bge => Ge, btr => Tr, bsy => Sy, bgb => Gb, btb => Tb, bsb => Sb,
    btp => Tp, bsp => Sp, bgd => Gd, bgt => Gt, bdt => Dt, bst => St,
);

/// Build a vector from scalars with a named vector constructor.
///
/// `vctr!(fv; 1.0, 2.0)` is `fv(vec![1.0, 2.0])`.
#[macro_export]
macro_rules! vctr {
    ($ctor:path; $($value:expr),* $(,)?) => {
        $ctor(::std::vec![$($value),*])
    };
}
