//! HLSL generation.
//!
//! Vertex inputs other than the position keep no GLSL attribute names on
//! the Direct3D side; the writer assigns each one a generic location
//! semantic (`LOC0`, `LOC1`, ...) with a strictly increasing index in
//! declaration order.

use naga::back::hlsl;

use crate::artifact::ShaderData;
use crate::error::TranslateError;
use crate::options::{CompileOptions, ShaderStage, TargetLanguage};

use super::{ingest_spirv, require_naga_stage};

pub(crate) fn generate(
    spirv: &[u32],
    stage: ShaderStage,
    options: &CompileOptions,
) -> Result<ShaderData, TranslateError> {
    let naga_stage = require_naga_stage(stage, TargetLanguage::Hlsl)?;
    let (module, info) = ingest_spirv(spirv)?;

    let hlsl_options = hlsl::Options {
        shader_model: shader_model(options.hlsl_shader_model)?,
        fake_missing_bindings: true,
        ..Default::default()
    };
    let pipeline_options = hlsl::PipelineOptions {
        entry_point: Some((naga_stage, "main".to_string())),
    };

    let mut output = String::new();
    let mut writer = hlsl::Writer::new(&mut output, &hlsl_options, &pipeline_options);
    writer
        .write(&module, &info, None)
        .map_err(|err| TranslateError::CrossCompile(err.to_string()))?;

    Ok(ShaderData::Source(output))
}

/// Map a shader-model integer (e.g. 50 for SM 5.0) onto the writer's
/// supported models.
fn shader_model(model: u32) -> Result<hlsl::ShaderModel, TranslateError> {
    let sm = match model {
        50 => hlsl::ShaderModel::V5_0,
        51 => hlsl::ShaderModel::V5_1,
        60 => hlsl::ShaderModel::V6_0,
        61 => hlsl::ShaderModel::V6_1,
        62 => hlsl::ShaderModel::V6_2,
        63 => hlsl::ShaderModel::V6_3,
        64 => hlsl::ShaderModel::V6_4,
        65 => hlsl::ShaderModel::V6_5,
        66 => hlsl::ShaderModel::V6_6,
        67 => hlsl::ShaderModel::V6_7,
        other => {
            return Err(TranslateError::CrossCompile(format!(
                "unsupported HLSL shader model: {other}"
            )));
        }
    };
    Ok(sm)
}
