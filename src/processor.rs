//! Round driver
//!
//! `Processor::process` is a pure function of the declarations in a round: it
//! returns the generated artifacts and diagnostics and keeps no state between
//! calls. `Processor::run_round` additionally submits the artifacts to a `Filer`.

use crate::backend::filer::{Artifact, Filer};
use crate::backend::java_emitter::JavaEmitter;
use crate::backend::spec::GeneratedClassSpec;
use crate::config::GeneratorConfig;
use crate::frontend::decl::{DeclId, DeclarationSet};
use crate::frontend::diagnostics::{Diagnostic, messages};
use crate::frontend::discover::discover;
use crate::frontend::extract::{GenerateError, extract};
use crate::frontend::names::generated_name;

/// Everything one round produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutput {
    /// One artifact per successfully generated declaration, in discovery order
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundOutput {
    /// The round failed if any declaration reported an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: GeneratorConfig,
}

impl Processor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Qualified names of the source markers this processor consumes
    pub fn supported_markers(&self) -> Vec<String> {
        vec![self.config.entity_marker.canonical(), self.config.transient_marker.canonical()]
    }

    /// Generate the companion for one declaration.
    ///
    /// Returns the artifact plus any non-fatal warnings about the declaration.
    pub fn generate(&self, set: &DeclarationSet, id: DeclId) -> Result<(Artifact, Vec<Diagnostic>), GenerateError> {
        let descriptor = extract(set, id)?;

        let mut warnings = Vec::new();
        if descriptor.primary_key_also_ignored() {
            tracing::warn!(
                declaration = %descriptor.qualified_source_name,
                field = %descriptor.primary_key,
                "primary key is also listed in ignores"
            );
            warnings.push(messages::primary_key_ignored(&descriptor));
        }

        let name = generated_name(set, id, &self.config.prefix)?;
        let spec = GeneratedClassSpec::build(&descriptor, name, &self.config);
        let contents = JavaEmitter::new(self.config.format.clone()).emit(&spec);

        let artifact = Artifact {
            name: spec.qualified_name(),
            originating: spec.originating,
            contents,
        };
        Ok((artifact, warnings))
    }

    /// Generate companions for every entity declaration in the round
    #[tracing::instrument(skip_all, fields(decl_count = set.len()))]
    pub fn process(&self, set: &DeclarationSet) -> RoundOutput {
        let mut output = RoundOutput::default();
        let candidates = discover(set);
        tracing::debug!(candidates = candidates.len(), "discovered entity declarations");

        for id in candidates {
            match self.generate(set, id) {
                Ok((artifact, warnings)) => {
                    tracing::debug!(
                        declaration = %artifact.originating,
                        companion = %artifact.name,
                        "generated companion class"
                    );
                    output.artifacts.push(artifact);
                    output.diagnostics.extend(warnings);
                }
                Err(err) => {
                    tracing::debug!(error = %err, "companion generation aborted");
                    output.diagnostics.push(messages::generation_failed(&err));
                }
            }
        }
        output
    }

    /// `process`, then submit each artifact to `filer`.
    ///
    /// Write failures become warnings; a previous write under the same name is
    /// assumed to hold identical output.
    #[tracing::instrument(skip_all, fields(decl_count = set.len()))]
    pub fn run_round(&self, set: &DeclarationSet, filer: &mut dyn Filer) -> RoundOutput {
        let mut output = self.process(set);
        for artifact in &output.artifacts {
            if let Err(err) = filer.create_source_file(artifact) {
                tracing::warn!(artifact = %artifact.name, error = %err, "could not write generated class");
                output
                    .diagnostics
                    .push(messages::write_failed(&artifact.name, &artifact.originating, &err));
            }
        }
        output
    }
}
