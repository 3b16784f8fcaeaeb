//! PharmExtract Domain Layer
//!
//! Core value types and trait interfaces shared by every other crate in the
//! workspace. Infrastructure (HTTP clients, file storage, the web server)
//! lives elsewhere and depends on the definitions here.
//!
//! ## Key Concepts
//!
//! - **Extraction**: a tagged span of source text with a category and attributes
//! - **Annotated document**: the gateway's response, source text plus extractions
//! - **Extraction record**: a normalized extraction whose attributes are all primitives
//! - **Examples type**: the domain (medical, financial, ...) selecting prompt and few-shot data
//! - **Extraction gateway**: the boundary to the hosted LLM extraction call

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod examples_type;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use document::{AnnotatedDocument, ExampleData, Extraction};
pub use examples_type::ExamplesType;
pub use record::{Attributes, ExtractionRecord, ExtractionResult, PrimitiveValue};
pub use traits::{ExtractionGateway, GatewayError, GatewayRequest};
