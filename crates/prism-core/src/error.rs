//! Error taxonomy for the translation pipeline.

use thiserror::Error;

/// Everything that can go wrong between GLSL text and a target artifact.
///
/// Public compile entry points never return this directly; failures are
/// carried inside [`crate::CompiledShader`] so callers check one success
/// flag per artifact. Internal seams propagate it with `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// GLSL source failed front-end parsing or validation.
    #[error("parse error:\n{0}")]
    Parse(String),

    /// Parsing succeeded but stage linking/finalization failed.
    #[error("link error: {0}")]
    Link(String),

    /// SPIR-V extraction or legalization failed or produced nothing usable.
    #[error("lowering error: {0}")]
    Lowering(String),

    /// A back-end generator failed while transforming SPIR-V to a target.
    #[error("cross-compile error: {0}")]
    CrossCompile(String),

    /// No dialect family in the capability set is supported.
    #[error("no supported shading language in capability set")]
    UnsupportedTarget,

    /// A compile operation ran before [`crate::initialize`].
    #[error("shader runtime not initialized; call initialize() first")]
    Uninitialized,
}
