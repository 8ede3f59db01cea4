#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![allow(async_fn_in_trait)]

pub mod field;
pub mod gatekeeper;
pub mod indicator;
pub mod picker;
pub mod transport;

#[doc(no_inline)]
pub use profile_fields_core::{
    Map, SharedString,
    application::init_tracing,
    datetime::{Date, DateFormat},
    error::Error,
    state::State,
};
