#![warn(missing_docs)]
//! `vtext-core` - Headless Diagnostic Virtual-Text Engine
//!
//! # Overview
//!
//! `vtext-core` renders diagnostic messages (errors/warnings/hints attached to
//! source lines) as wrapped, multi-line chunk rows placed next to or around the
//! relevant line, while minimizing recomputation. It is headless: the host
//! editor supplies diagnostics and line geometry, and consumes chunk rows
//! through its own decoration API.
//!
//! # Core Features
//!
//! - **Line-range diagnostic index**: per-buffer line → overlapping-diagnostics
//!   map with incremental update, multi-line span cascading, and counted removal
//! - **Layout planning**: orientation (inline / stacked above / stacked below),
//!   wrap width, and a degradation ladder that drops decoration before content
//! - **Greedy message wrapping**: space-aware with hard-break continuation
//!   markers
//! - **Layout caching**: planner + wrapper output memoized per diagnostic
//!   identity, reused across cursor moves, cleared on width-affecting events
//! - **Debounced intake**: bursts of diagnostic updates collapse into one
//!   index rebuild after a quiet interval
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  BufferSession & RenderHost seam            │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Assembler (chunk rows per diagnostic)      │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Layout Cache (per diagnostic identity)     │  ← Memoization
//! ├─────────────────────────────────────────────┤
//! │  Layout Planner + Chunk Formatter           │  ← Width Decisions
//! ├─────────────────────────────────────────────┤
//! │  Text Wrapper                               │  ← Message Layout
//! ├─────────────────────────────────────────────┤
//! │  Diagnostic Line Index + Severity Fetcher   │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use vtext_core::{
//!     BufferSession, DiagnosticRecord, LineGeometry, Severity, SeverityOrder, Span, UiConfig,
//! };
//!
//! let mut session = BufferSession::new(UiConfig::default(), 120);
//!
//! // Provider lines are 0-based; the index is 1-based internally.
//! session.update_index(vec![DiagnosticRecord::new(
//!     Severity::Error,
//!     Span::on_line(9, 4, 10),
//!     "cannot find value `x` in this scope",
//! )]);
//!
//! let top = session
//!     .fetch(10, SeverityOrder::MostSevereFirst, true)
//!     .into_iter()
//!     .next()
//!     .unwrap();
//! let rendered = session.render(&top, LineGeometry::of("    let y = x;"));
//! assert!(!rendered.primary.is_empty());
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - severity, span, and identity model
//! - [`line_index`] - per-buffer line → diagnostics index
//! - [`fetch`] - severity-ordered queries with early stop
//! - [`wrap`] - greedy message wrapping
//! - [`layout`] - layout planning and the degradation ladder
//! - [`chunks`] - per-line chunk composition
//! - [`cache`] - per-identity layout memoization
//! - [`assemble`] - chunk-row assembly
//! - [`session`] - per-buffer session and debouncing
//! - [`anchor`] - host decoration seam
//! - [`config`] - UI configuration surface
//!
//! # Concurrency
//!
//! Single-threaded cooperative model: sessions are owned by the host's event
//! loop, every operation is a synchronous in-memory computation, and a newer
//! debounce deadline supersedes a pending one.

pub mod anchor;
pub mod assemble;
pub mod cache;
pub mod chunks;
pub mod config;
pub mod diagnostics;
pub mod fetch;
pub mod layout;
pub mod line_index;
pub mod session;
pub mod wrap;

pub use anchor::{render_at, AnchorKey, RenderHost, VirtualTextPlacement};
pub use assemble::{render, RenderedDiagnostic};
pub use cache::{CachedLayout, LayoutCache};
pub use chunks::{format_line, Chunk, ChunkPart, ChunkStyle};
pub use config::UiConfig;
pub use diagnostics::{
    Diagnostic, DiagnosticHandle, DiagnosticId, DiagnosticRecord, Severity, SeverityError, Span,
};
pub use fetch::{fetch, fetch_at_cursor, fetch_early, fetch_until, CursorFetch, SeverityOrder};
pub use layout::{plan, str_width, Degradation, LayoutPlan, LineGeometry, MIN_WRAP_LENGTH};
pub use line_index::{DiagnosticLineIndex, LineEntry, LineUpdate};
pub use session::{BufferSession, Debouncer, DEBOUNCE_INTERVAL};
pub use wrap::{fill, wrap, WrappedText, CONTINUATION_MARKER};
