use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use pointgen_core::GenerationInputs;

use crate::compiler::compile;
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::loader::load_devices;
use crate::model::{GenerateOptions, GenerationResult};
use crate::output::write_point_table;
use crate::templates::TemplateProvider;

/// Entry point for generating a point table from a device list and template.
#[derive(Debug, Clone, Default)]
pub struct PointTableEngine {
    options: GenerateOptions,
}

impl PointTableEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run<P: TemplateProvider + ?Sized>(
        &self,
        devices_path: &Path,
        provider: &P,
        inputs: &GenerationInputs,
    ) -> Result<GenerationResult, GenerationError> {
        let ctx = GenerationContext::new(&inputs.device_type);
        self.run_with_context(&ctx, devices_path, provider, inputs)
    }

    /// Same as [`run`](Self::run) with a caller-supplied context.
    pub fn run_with_context<P: TemplateProvider + ?Sized>(
        &self,
        ctx: &GenerationContext,
        devices_path: &Path,
        provider: &P,
        inputs: &GenerationInputs,
    ) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        info!(
            parent: ctx.span(),
            devices = %devices_path.display(),
            channel = %inputs.channel,
            device_name = %inputs.device_name,
            "generation started"
        );

        let devices = load_devices(devices_path, ctx)?;
        let entries = provider.get_template(&inputs.device_type)?;
        if entries.is_empty() {
            warn!(parent: ctx.span(), "template has no entries");
        }
        if !self.options.allow_empty {
            if devices.is_empty() {
                return Err(GenerationError::EmptyInput("device list"));
            }
            if entries.is_empty() {
                return Err(GenerationError::EmptyInput("template"));
            }
        }

        let table = compile(&devices, &entries, inputs, &self.options.compile, ctx)?;
        let outcome = write_point_table(
            &table,
            &inputs.device_type,
            &self.options.base_dir,
            &self.options.write,
            ctx,
        )?;

        info!(
            parent: ctx.span(),
            rows = outcome.rows,
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );

        Ok(GenerationResult {
            output_path: outcome.path,
            devices: devices.len(),
            template_entries: entries.len(),
            rows: outcome.rows,
            message: outcome.message,
        })
    }
}
