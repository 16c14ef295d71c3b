//! Back-end generators, one per target dialect.
//!
//! Every generator consumes SPIR-V words plus [`CompileOptions`] and emits
//! either source text or binary. Library failures are converted to
//! [`TranslateError`] at the naga call sites; nothing panics across this
//! boundary.

mod glsl;
mod hlsl;
mod msl;

use crate::artifact::{CompiledShader, ShaderData};
use crate::error::TranslateError;
use crate::options::{CompileOptions, ShaderStage, TargetLanguage};

/// Cross-compile SPIR-V words to `target`.
///
/// The SPIR-V target is an identity passthrough and always succeeds.
pub fn cross_compile(
    spirv: &[u32],
    stage: ShaderStage,
    target: TargetLanguage,
    options: &CompileOptions,
) -> CompiledShader {
    let result = match target {
        TargetLanguage::Spirv => Ok(ShaderData::Words(spirv.to_vec())),
        TargetLanguage::Glsl => glsl::generate(spirv, stage, options, false),
        TargetLanguage::GlslEs => glsl::generate(spirv, stage, options, true),
        TargetLanguage::Hlsl => hlsl::generate(spirv, stage, options),
        TargetLanguage::Metal => msl::generate(spirv, stage, options),
    };

    match result {
        Ok(data) => CompiledShader::ok(data, stage, target),
        Err(err) => {
            log::debug!("{target} back end failed for {stage} shader: {err}");
            CompiledShader::failure(err, stage, target)
        }
    }
}

/// Parse and validate SPIR-V words into naga's module form.
///
/// Shared by every textual generator and by the front end's optional
/// validation pass. One parser instance per call; no shared state.
pub(crate) fn ingest_spirv(
    spirv: &[u32],
) -> Result<(naga::Module, naga::valid::ModuleInfo), TranslateError> {
    let module = naga::front::spv::Frontend::new(
        spirv.iter().cloned(),
        &naga::front::spv::Options::default(),
    )
    .parse()
    .map_err(|err| TranslateError::CrossCompile(format!("SPIR-V ingestion failed: {err}")))?;

    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|err| {
        TranslateError::CrossCompile(format!("SPIR-V validation failed: {}", err.into_inner()))
    })?;

    Ok((module, info))
}

/// Stage check shared by the textual generators: naga has no geometry or
/// tessellation representation, so those fail here instead of deeper in a
/// writer.
pub(crate) fn require_naga_stage(
    stage: ShaderStage,
    target: TargetLanguage,
) -> Result<naga::ShaderStage, TranslateError> {
    stage.naga_stage().ok_or_else(|| {
        TranslateError::CrossCompile(format!(
            "{stage} shaders cannot be cross-compiled to {target}"
        ))
    })
}
