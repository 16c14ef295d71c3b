//! prism-core — GLSL-to-anything shader translation.
//!
//! One Vulkan-dialect GLSL source goes in; SPIR-V or any of four textual
//! shading dialects comes out, selected either explicitly or by
//! negotiating against the capability codes a graphics device reports.
//!
//! Pipeline: GLSL text → front end (shaderc) → SPIR-V words → back end
//! (naga) → [`CompiledShader`] → optionally the header packager.
//!
//! ```no_run
//! use prism_core::{CompileOptions, ShaderStage, TargetLanguage};
//!
//! prism_core::initialize();
//! let options = CompileOptions::default();
//! let shader = prism_core::compile(
//!     "#version 450\nvoid main() { gl_Position = vec4(0.0); }",
//!     ShaderStage::Vertex,
//!     TargetLanguage::Metal,
//!     &options,
//! );
//! assert!(shader.success, "{}", shader.error_message());
//! prism_core::shutdown();
//! ```

mod artifact;
mod backend;
pub mod capability;
mod error;
mod frontend;
mod header;
mod limits;
mod options;
mod pipeline;
mod runtime;

pub use artifact::{CompiledShader, ShaderData};
pub use backend::cross_compile;
pub use capability::{Support, classify};
pub use error::TranslateError;
pub use frontend::compile_to_spirv;
pub use header::generate_header;
pub use options::{CompileOptions, ShaderStage, TargetLanguage};
pub use pipeline::{compile, select_target};
pub use runtime::{initialize, shutdown};
