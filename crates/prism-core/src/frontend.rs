//! Front end: Vulkan-dialect GLSL to SPIR-V.
//!
//! Sources are parsed as Vulkan GLSL (450-style semantics) no matter
//! which dialect is eventually emitted; SPIR-V is the one canonical
//! intermediate everything downstream consumes. A fresh compiler is
//! constructed per call, so concurrent compiles never share state.

use crate::artifact::{CompiledShader, ShaderData};
use crate::error::TranslateError;
use crate::limits;
use crate::options::{CompileOptions, ShaderStage, TargetLanguage};
use crate::runtime;

/// Compile GLSL source to SPIR-V words.
///
/// The returned artifact's target is always [`TargetLanguage::Spirv`];
/// failures are reported through its success flag.
pub fn compile_to_spirv(
    source: &str,
    stage: ShaderStage,
    options: &CompileOptions,
) -> CompiledShader {
    match lower(source, stage, options) {
        Ok(words) => CompiledShader::ok(ShaderData::Words(words), stage, TargetLanguage::Spirv),
        Err(err) => {
            log::debug!("front end failed for {stage} shader: {err}");
            CompiledShader::failure(err, stage, TargetLanguage::Spirv)
        }
    }
}

fn lower(
    source: &str,
    stage: ShaderStage,
    options: &CompileOptions,
) -> Result<Vec<u32>, TranslateError> {
    if !runtime::is_initialized() {
        return Err(TranslateError::Uninitialized);
    }

    let compiler = shaderc::Compiler::new()
        .ok_or_else(|| TranslateError::Lowering("failed to construct front-end compiler".into()))?;
    let mut front_options = shaderc::CompileOptions::new().ok_or_else(|| {
        TranslateError::Lowering("failed to construct front-end compile options".into())
    })?;

    front_options.set_source_language(shaderc::SourceLanguage::GLSL);
    front_options.set_target_env(
        shaderc::TargetEnv::Vulkan,
        shaderc::EnvVersion::Vulkan1_2 as u32,
    );
    front_options.set_target_spirv(shaderc::SpirvVersion::V1_5);
    front_options.set_optimization_level(if options.spirv_optimize {
        shaderc::OptimizationLevel::Performance
    } else {
        shaderc::OptimizationLevel::Zero
    });
    if options.debug_info {
        front_options.set_generate_debug_info();
    }
    limits::apply(&mut front_options);

    let artifact = compiler
        .compile_into_spirv(
            source,
            stage.shaderc_kind(),
            "shader.glsl",
            "main",
            Some(&front_options),
        )
        .map_err(classify_front_error)?;

    // Parsing can nominally succeed while the SPIR-V build step still
    // reports error-grade diagnostics; treat those as failures too.
    if artifact.get_num_warnings() > 0 {
        let messages = artifact.get_warning_messages();
        if messages.to_ascii_lowercase().contains("error") {
            return Err(TranslateError::Lowering(messages));
        }
        log::debug!("front end warnings for {stage} shader:\n{messages}");
    }

    let words = artifact.as_binary().to_vec();
    if words.is_empty() {
        return Err(TranslateError::Lowering(
            "front end produced no intermediate representation".into(),
        ));
    }

    if options.spirv_validate {
        crate::backend::ingest_spirv(&words)
            .map_err(|err| TranslateError::Lowering(err.to_string()))?;
    }

    Ok(words)
}

fn classify_front_error(err: shaderc::Error) -> TranslateError {
    match err {
        shaderc::Error::CompilationError(_, log) => TranslateError::Parse(log),
        shaderc::Error::InvalidStage(log) => TranslateError::Link(log),
        shaderc::Error::InternalError(log)
        | shaderc::Error::InvalidAssembly(log)
        | shaderc::Error::NullResultObject(log) => TranslateError::Lowering(log),
    }
}
