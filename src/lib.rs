//! Vehicle sticker designer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. A user picks
//! a vehicle silhouette, then decorates it with catalog stickers, uploaded
//! images and text, moves, scales and rotates them on a canvas, and exports
//! the result as a PNG. The host JavaScript layer wires DOM events to the
//! [`web::Designer`] facade and reacts to the returned [`engine::Action`]s.
//!
//! Everything except [`assets`], [`render::paint`], [`engine::Engine`] and
//! [`web`] is plain Rust and runs under `cargo test` on the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Scene model and placed object types |
//! | [`catalog`] | Sticker catalog and category/tag queries |
//! | [`fit`] | Scale-to-fit for uploaded images |
//! | [`media`] | MIME validation, dimension probing, data URLs |
//! | [`selection`] | Selection state and text panel binding |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against rotated object bounds |
//! | [`geom`] | Points and rotated rectangles |
//! | [`render`] | Display list planning and `Canvas2D` painting |
//! | [`assets`] | Browser image cache |
//! | [`placeholder`] | Built-in SVG artwork |
//! | [`export`] | Export settings and file naming |
//! | [`config`] | Host-supplied configuration |
//! | [`color`] | Hex color parsing |
//! | [`error`] | Error type |
//! | [`consts`] | Shared numeric and style constants |
//! | [`web`] | `wasm_bindgen` facade |

pub mod assets;
pub mod catalog;
pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod export;
pub mod fit;
pub mod geom;
pub mod hit;
pub mod input;
pub mod media;
pub mod placeholder;
pub mod render;
pub mod selection;
pub mod web;
