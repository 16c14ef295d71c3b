//! GLSL and GLSL ES generation.
//!
//! OpenGL has no separate-sampler objects, so the writer merges every
//! texture+sampler pair into one combined binding. The combined binding
//! inherits the original texture's descriptor-set and binding-slot pair,
//! keeping downstream pipeline layouts consistent with the pre-merge
//! bindings.

use std::collections::BTreeMap;

use naga::back::glsl;

use crate::artifact::ShaderData;
use crate::error::TranslateError;
use crate::options::{CompileOptions, ShaderStage, TargetLanguage};

use super::{ingest_spirv, require_naga_stage};

pub(crate) fn generate(
    spirv: &[u32],
    stage: ShaderStage,
    options: &CompileOptions,
    es_target: bool,
) -> Result<ShaderData, TranslateError> {
    let target = if es_target {
        TargetLanguage::GlslEs
    } else {
        TargetLanguage::Glsl
    };
    let naga_stage = require_naga_stage(stage, target)?;
    let (module, info) = ingest_spirv(spirv)?;

    // The ES target forces the embedded profile and ignores the
    // desktop-only 420pack toggle; the desktop target honors the es flag.
    let (version, explicit_bindings) = if es_target {
        let v = options.glsl_es_version;
        (embedded(v), v >= 310)
    } else if options.glsl_es {
        let v = options.glsl_version;
        (embedded(v), v >= 310)
    } else {
        let v = options.glsl_version;
        (
            glsl::Version::Desktop(v as u16),
            v >= 420 || options.enable_420pack,
        )
    };

    // Explicit binding layout qualifiers are only legal at 4.20+ (or via
    // the 420pack extension) and ES 3.10+; below that the driver assigns
    // slots by name.
    let binding_map = if explicit_bindings {
        binding_map_for(&module)
    } else {
        BTreeMap::new()
    };

    let glsl_options = glsl::Options {
        version,
        binding_map,
        ..Default::default()
    };
    let pipeline_options = glsl::PipelineOptions {
        shader_stage: naga_stage,
        entry_point: "main".to_string(),
        multiview: None,
    };

    let mut output = String::new();
    let mut writer = glsl::Writer::new(
        &mut output,
        &module,
        &info,
        &glsl_options,
        &pipeline_options,
        naga::proc::BoundsCheckPolicies::default(),
    )
    .map_err(|err| TranslateError::CrossCompile(err.to_string()))?;
    let reflection = writer
        .write()
        .map_err(|err| TranslateError::CrossCompile(err.to_string()))?;

    for (name, binding) in inherited_sampler_bindings(&module, &reflection.texture_mapping) {
        log::debug!(
            "combined sampler `{name}` inherits set {} binding {}",
            binding.group,
            binding.binding
        );
    }

    Ok(ShaderData::Source(output))
}

fn embedded(version: u32) -> glsl::Version {
    glsl::Version::Embedded {
        version: version as u16,
        is_webgl: false,
    }
}

/// Map every texture and sampler resource to its original binding slot so
/// the emitted layout qualifiers match the pre-merge bindings.
fn binding_map_for(module: &naga::Module) -> glsl::BindingMap {
    let mut map = glsl::BindingMap::new();
    for (_, var) in module.global_variables.iter() {
        let Some(ref binding) = var.binding else {
            continue;
        };
        match module.types[var.ty].inner {
            naga::TypeInner::Image { .. } | naga::TypeInner::Sampler { .. } => {
                if let Ok(slot) = u8::try_from(binding.binding) {
                    map.insert(binding.clone(), slot);
                }
            }
            _ => {}
        }
    }
    map
}

/// Combined bindings synthesized by the writer, paired with the
/// set/binding decoration of the texture each was merged from.
fn inherited_sampler_bindings<'a>(
    module: &'a naga::Module,
    texture_mapping: &'a naga::FastHashMap<String, glsl::TextureMapping>,
) -> impl Iterator<Item = (&'a str, &'a naga::ResourceBinding)> {
    texture_mapping
        .iter()
        .filter(|(_, mapping)| mapping.sampler.is_some())
        .filter_map(|(name, mapping)| {
            let texture = &module.global_variables[mapping.texture];
            texture
                .binding
                .as_ref()
                .map(|binding| (name.as_str(), binding))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_with_texture_and_sampler(group: u32, binding: u32) -> naga::Module {
        let mut module = naga::Module::default();
        let ty_image = module.types.insert(
            naga::Type {
                name: None,
                inner: naga::TypeInner::Image {
                    dim: naga::ImageDimension::D2,
                    arrayed: false,
                    class: naga::ImageClass::Sampled {
                        kind: naga::ScalarKind::Float,
                        multi: false,
                    },
                },
            },
            naga::Span::UNDEFINED,
        );
        let ty_sampler = module.types.insert(
            naga::Type {
                name: None,
                inner: naga::TypeInner::Sampler { comparison: false },
            },
            naga::Span::UNDEFINED,
        );
        module.global_variables.append(
            naga::GlobalVariable {
                name: Some("color_map".into()),
                space: naga::AddressSpace::Handle,
                binding: Some(naga::ResourceBinding { group, binding }),
                ty: ty_image,
                init: None,
            },
            naga::Span::UNDEFINED,
        );
        module.global_variables.append(
            naga::GlobalVariable {
                name: Some("color_sampler".into()),
                space: naga::AddressSpace::Handle,
                binding: Some(naga::ResourceBinding {
                    group,
                    binding: binding + 1,
                }),
                ty: ty_sampler,
                init: None,
            },
            naga::Span::UNDEFINED,
        );
        module
    }

    #[test]
    fn test_binding_map_preserves_original_slots() {
        let module = module_with_texture_and_sampler(0, 1);
        let map = binding_map_for(&module);

        assert_eq!(
            map.get(&naga::ResourceBinding {
                group: 0,
                binding: 1
            }),
            Some(&1)
        );
        assert_eq!(
            map.get(&naga::ResourceBinding {
                group: 0,
                binding: 2
            }),
            Some(&2)
        );
    }

    #[test]
    fn test_binding_map_skips_unbound_globals() {
        let mut module = module_with_texture_and_sampler(0, 1);
        for (_, var) in module.global_variables.iter_mut() {
            var.binding = None;
        }
        assert!(binding_map_for(&module).is_empty());
    }

    #[test]
    fn test_combined_sampler_inherits_texture_pair() {
        let module = module_with_texture_and_sampler(1, 3);
        let texture_handle = module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some("color_map"))
            .map(|(handle, _)| handle)
            .unwrap();
        let sampler_handle = module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some("color_sampler"))
            .map(|(handle, _)| handle)
            .unwrap();

        let mut texture_mapping = naga::FastHashMap::default();
        texture_mapping.insert(
            "color_map_color_sampler".to_string(),
            glsl::TextureMapping {
                texture: texture_handle,
                sampler: Some(sampler_handle),
            },
        );

        let combined: Vec<_> = inherited_sampler_bindings(&module, &texture_mapping).collect();
        assert_eq!(combined.len(), 1);
        let (name, binding) = combined[0];
        assert_eq!(name, "color_map_color_sampler");
        assert_eq!(binding.group, 1);
        assert_eq!(binding.binding, 3);
    }
}
