//! Selection and contract text engine.
//!
//! - **prefix** / **catalog**: indexed catalog lookups and selector option lists
//! - **selection**: the serializable selection state tree and its operations
//! - **session**: the controller that owns catalog and state
//! - **promotion**: promotion shape resolution
//! - **render**: paragraph, pricing, billing and home clause renderers
//! - **aggregate** / **panel**: totals and on-screen detail panels
//! - **contract**: placeholder map and template routing
//! - **telemetry**: fire-and-forget submission notices

pub mod aggregate;
pub mod catalog;
pub mod contract;
pub mod error;
pub mod panel;
pub mod prefix;
pub mod promotion;
pub mod render;
pub mod selection;
pub mod session;
pub mod telemetry;

pub use aggregate::{Aggregate, aggregate};
pub use catalog::Catalog;
pub use contract::{ContractDocument, build_contract, sanitize_file_name};
pub use error::{Result, SelectionError, SinkError};
pub use panel::{DetailPanel, PanelLine, build_detail_panel, offer_lines};
pub use prefix::{matches_any_prefix, matches_prefix};
pub use promotion::{
    MonthSpec, PromotionShape, ResolvedPromotion, TAIL_OFFSET_MULTIPLIER, resolve_shape,
};
pub use render::{
    EMPTY_DETAILS_TEXT, EMPTY_PRICING_TEXT, RenderContext, line_label, render_billing_line,
    render_home_clause, render_paragraph, render_pricing_line,
};
pub use selection::{
    SectionState, Selection, SelectionLine, SelectionState, SubsectionState,
};
pub use session::Session;
pub use telemetry::{SubmissionNotice, SubmissionSink, dispatch_notice};
