//! Metal Shading Language generation.

use naga::back::msl;

use crate::artifact::ShaderData;
use crate::error::TranslateError;
use crate::options::{CompileOptions, ShaderStage, TargetLanguage};

use super::{ingest_spirv, require_naga_stage};

pub(crate) fn generate(
    spirv: &[u32],
    stage: ShaderStage,
    options: &CompileOptions,
) -> Result<ShaderData, TranslateError> {
    require_naga_stage(stage, TargetLanguage::Metal)?;
    let (module, info) = ingest_spirv(spirv)?;

    let mut msl_options = msl::Options {
        lang_version: decode_version(options.metal_version),
        fake_missing_bindings: true,
        ..Default::default()
    };
    if options.metal_decoration_binding {
        msl_options.per_entry_point_map = binding_preserving_map(&module);
    }

    let (output, _) = msl::write_string(
        &module,
        &info,
        &msl_options,
        &msl::PipelineOptions::default(),
    )
    .map_err(|err| TranslateError::CrossCompile(err.to_string()))?;

    Ok(ShaderData::Source(output))
}

/// Decode major*10000 + minor*100 + patch into the writer's (major, minor).
fn decode_version(encoded: u32) -> (u8, u8) {
    ((encoded / 10000) as u8, ((encoded / 100) % 100) as u8)
}

/// Assign every bound resource the argument slot matching its original
/// binding decoration, for every entry point in the module.
fn binding_preserving_map(module: &naga::Module) -> msl::EntryPointResourceMap {
    let resources = bind_targets(module);

    let mut map = msl::EntryPointResourceMap::new();
    for entry_point in module.entry_points.iter() {
        map.insert(
            entry_point.name.clone(),
            msl::EntryPointResources {
                resources: resources.clone(),
                ..Default::default()
            },
        );
    }
    map
}

/// Route each bound global to the Metal argument kind matching its type:
/// images to texture slots, samplers to sampler slots, everything else to
/// buffer slots (mutable when the address space permits stores). Resources
/// whose slot does not fit Metal's 8-bit argument indices fall back to
/// fabricated bindings.
fn bind_targets(module: &naga::Module) -> msl::BindingMap {
    let mut resources = msl::BindingMap::new();
    for (_, var) in module.global_variables.iter() {
        let Some(ref binding) = var.binding else {
            continue;
        };
        let Ok(slot) = u8::try_from(binding.binding) else {
            continue;
        };

        let mut target = msl::BindTarget::default();
        match module.types[var.ty].inner {
            naga::TypeInner::Image { .. } => target.texture = Some(slot),
            naga::TypeInner::Sampler { .. } => {
                target.sampler = Some(msl::BindSamplerTarget::Resource(slot));
            }
            _ => {
                target.buffer = Some(slot);
                target.mutable = matches!(
                    var.space,
                    naga::AddressSpace::Storage { access }
                        if access.contains(naga::StorageAccess::STORE)
                );
            }
        }
        resources.insert(binding.clone(), target);
    }
    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_version() {
        assert_eq!(decode_version(20100), (2, 1));
        assert_eq!(decode_version(10200), (1, 2));
        assert_eq!(decode_version(30000), (3, 0));
    }

    fn module_with_bound_resources() -> naga::Module {
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
        let ty_float = module.types.insert(
            naga::Type {
                name: None,
                inner: naga::TypeInner::Scalar(naga::Scalar::F32),
            },
            naga::Span::UNDEFINED,
        );

        let bind = |group, binding| Some(naga::ResourceBinding { group, binding });
        module.global_variables.append(
            naga::GlobalVariable {
                name: Some("color_map".into()),
                space: naga::AddressSpace::Handle,
                binding: bind(0, 1),
                ty: ty_image,
                init: None,
            },
            naga::Span::UNDEFINED,
        );
        module.global_variables.append(
            naga::GlobalVariable {
                name: Some("color_sampler".into()),
                space: naga::AddressSpace::Handle,
                binding: bind(0, 2),
                ty: ty_sampler,
                init: None,
            },
            naga::Span::UNDEFINED,
        );
        module.global_variables.append(
            naga::GlobalVariable {
                name: Some("data".into()),
                space: naga::AddressSpace::Storage {
                    access: naga::StorageAccess::LOAD | naga::StorageAccess::STORE,
                },
                binding: bind(0, 3),
                ty: ty_float,
                init: None,
            },
            naga::Span::UNDEFINED,
        );
        module
    }

    #[test]
    fn test_bind_targets_keep_original_slots_per_resource_kind() {
        let targets = bind_targets(&module_with_bound_resources());
        let at = |binding| {
            targets
                .get(&naga::ResourceBinding { group: 0, binding })
                .unwrap()
        };

        assert_eq!(at(1).texture, Some(1));
        assert_eq!(at(2).sampler, Some(msl::BindSamplerTarget::Resource(2)));
        assert_eq!(at(3).buffer, Some(3));
        assert!(at(3).mutable);
    }

    #[test]
    fn test_bind_targets_skip_unbound_globals() {
        let mut module = module_with_bound_resources();
        for (_, var) in module.global_variables.iter_mut() {
            var.binding = None;
        }
        assert!(bind_targets(&module).is_empty());
    }

    #[test]
    fn test_binding_preserving_map_is_keyed_by_entry_points() {
        // No entry points means nothing to attach the slots to.
        let map = binding_preserving_map(&module_with_bound_resources());
        assert!(map.is_empty());
    }
}
