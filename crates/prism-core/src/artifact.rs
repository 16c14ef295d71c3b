//! Compiled shader artifacts.

use crate::error::TranslateError;
use crate::options::{ShaderStage, TargetLanguage};

/// Payload of a compiled shader: source text for the textual dialects,
/// a 32-bit word stream for SPIR-V.
///
/// Callers that handle artifacts generically (e.g. the header packager)
/// must match on the variant rather than assume one from the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderData {
    Source(String),
    Words(Vec<u32>),
}

impl ShaderData {
    /// Empty payload of the kind expected for `target`.
    fn empty_for(target: TargetLanguage) -> Self {
        if target.is_binary() {
            ShaderData::Words(Vec::new())
        } else {
            ShaderData::Source(String::new())
        }
    }

    pub fn as_source(&self) -> Option<&str> {
        match self {
            ShaderData::Source(code) => Some(code),
            ShaderData::Words(_) => None,
        }
    }

    pub fn as_words(&self) -> Option<&[u32]> {
        match self {
            ShaderData::Source(_) => None,
            ShaderData::Words(words) => Some(words),
        }
    }
}

/// Result of a compile or cross-compile operation.
///
/// Self-contained value: safe to store, clone and move across threads.
/// `error` is `Some` exactly when `success` is false.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    /// Shader code or binary.
    pub data: ShaderData,
    /// Failure cause, if any.
    pub error: Option<TranslateError>,
    /// Whether compilation succeeded.
    pub success: bool,
    /// Target language actually requested/produced.
    pub target: TargetLanguage,
    /// Stage the shader was compiled for.
    pub stage: ShaderStage,
}

impl CompiledShader {
    pub(crate) fn ok(data: ShaderData, stage: ShaderStage, target: TargetLanguage) -> Self {
        Self {
            data,
            error: None,
            success: true,
            target,
            stage,
        }
    }

    pub(crate) fn failure(
        error: TranslateError,
        stage: ShaderStage,
        target: TargetLanguage,
    ) -> Self {
        Self {
            data: ShaderData::empty_for(target),
            error: Some(error),
            success: false,
            target,
            stage,
        }
    }

    /// Diagnostic text for a failed artifact; empty on success.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default()
    }
}
