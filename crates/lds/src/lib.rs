#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use lds_linalg as linalg;

#[doc(inline)]
pub use lds_amf as amf;
