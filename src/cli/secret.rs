//! `yaml` and `file` commands.
//!
//! Both read an input file into a secret map, resolve the output path and
//! certificate (optionally from a stage config), then run the pipeline.

use std::path::Path;

use tracing::{debug, warn};

use crate::cli::{output, SecretArgs, Tools};
use crate::core::config::{self, StageConfiguration};
use crate::core::pipeline;
use crate::core::secret::{self, SecretMap};
use crate::error::Result;

/// Create a secret from the key-value pairs in a yaml file.
pub fn yaml(args: &SecretArgs, stage: Option<&str>, tools: &Tools) -> Result<()> {
    let target = Target::resolve(args, stage)?;

    let content = secret::read_input(&args.file)?;
    let secrets = secret::from_yaml(&content, &args.file)?;

    generate(&secrets, args, &target, tools)
}

/// Create a secret holding a whole file under `key`.
pub fn file(args: &SecretArgs, key: &str, stage: Option<&str>, tools: &Tools) -> Result<()> {
    let target = Target::resolve(args, stage)?;

    let content = secret::read_input(&args.file)?;
    let secrets = secret::from_file(key, &content, &args.file)?;

    generate(&secrets, args, &target, tools)
}

/// Where the output goes and whether it gets sealed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Target {
    pub out: Option<String>,
    pub cert: Option<String>,
}

impl Target {
    /// Apply the named stage config, if any, to the command line flags.
    pub fn resolve(args: &SecretArgs, stage: Option<&str>) -> Result<Self> {
        let flags = Self {
            out: args.out.clone(),
            cert: args.cert.clone(),
        };

        let target = match stage {
            Some(name) => flags.with_stage(&config::resolve_stage(name)?),
            None => flags,
        };

        Ok(Self {
            out: target.out.filter(|o| !o.is_empty()),
            cert: target.cert.filter(|c| !c.is_empty()),
        })
    }

    /// Prefix the stage base path onto `out` and replace the certificate.
    ///
    /// The stage certificate wins even over an explicit `--cert`.
    pub fn with_stage(self, stage: &StageConfiguration) -> Self {
        if let Some(explicit) = self.cert.as_deref() {
            if explicit != stage.cert {
                warn!(stage = %stage.name, "stage cert overrides --cert");
                output::warn(&format!(
                    "--cert {} is overridden by stage {} ({})",
                    explicit,
                    output::key(&stage.name),
                    display_cert(&stage.cert)
                ));
            }
        }

        let out = self.out.map(|out| {
            if stage.base_path.is_empty() {
                out
            } else {
                format!("{}/{}", stage.base_path, out)
            }
        });

        Self {
            out,
            cert: Some(stage.cert.clone()),
        }
    }
}

fn display_cert(cert: &str) -> &str {
    if cert.is_empty() {
        "no cert, unsealed"
    } else {
        cert
    }
}

fn generate(secrets: &SecretMap, args: &SecretArgs, target: &Target, tools: &Tools) -> Result<()> {
    let out = target.out.as_deref().map(Path::new);
    if let Some(path) = out {
        pipeline::ensure_parent_dir(path)?;
    }

    let create = secret::build_secret_command(
        secrets,
        &args.secret_name,
        &args.namespace,
        &tools.kubectl,
    );

    let manifest = match target.cert.as_deref() {
        Some(cert) => {
            debug!(cert, "sealing secret");
            pipeline::run_sealed(create, secret::build_seal_command(cert, &tools.kubeseal))?
        }
        None => pipeline::run(create)?,
    };

    pipeline::write_output(&manifest, out)?;

    if let Some(path) = out {
        output::success(&format!("wrote {}", output::path(&path.display().to_string())));
    }
    Ok(())
}
