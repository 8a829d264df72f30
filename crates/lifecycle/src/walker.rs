//! Manifest walker - applies an action to every declared resource in order

use crate::controller::Target;
use crate::error::WalkError;
use crate::registry::Registry;
use crate::reporter::Reporter;
use crate::types::{Action, Outcome, RunSummary, Severity};
use manifest::{Compartment, Manifest, ResourceDeclaration};
use ocikit::Backend;

/// Walk the manifest, compartment by compartment, declaration by declaration
///
/// Every declaration produces exactly one reported outcome. Provider errors
/// specific to one resource are reported and the walk moves on; errors that
/// would recur for every resource (authentication, connectivity, provider
/// configuration) end the walk with [`WalkError::Aborted`].
pub fn walk(
    manifest: &Manifest,
    action: Action,
    backend: &dyn Backend,
    registry: &Registry,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, WalkError> {
    let mut summary = RunSummary::default();

    for (compartment, decl) in manifest.declarations() {
        reporter.report(
            Severity::Debug,
            &format!(
                "Processing {} {} in compartment {}",
                decl.resource_type, decl.name, compartment.name
            ),
        );

        let outcome = process(decl, compartment, action, backend, registry)?;
        reporter.report(outcome.severity(), &outcome.message);
        summary.add(&outcome);
    }

    reporter.report(
        Severity::Info,
        &format!("Processed {} resources: {}", summary.total(), summary),
    );
    if !summary.is_clean() {
        reporter.report(
            Severity::Warning,
            &format!(
                "{} resources could not be processed; see the errors above.",
                summary.unknown_type + summary.failed
            ),
        );
    }
    reporter.report(Severity::Info, "Run completed successfully.");

    Ok(summary)
}

/// Handle a single declaration
fn process(
    decl: &ResourceDeclaration,
    compartment: &Compartment,
    action: Action,
    backend: &dyn Backend,
    registry: &Registry,
) -> Result<Outcome, WalkError> {
    if decl.exclude {
        return Ok(Outcome::excluded(format!(
            "{} {} in compartment {} has been excluded.",
            decl.resource_type, decl.name, compartment.name
        )));
    }

    let target = Target::new(decl, compartment);
    match registry.route(&decl.resource_type, backend, &target, action) {
        Ok(outcome) => Ok(outcome),
        Err(source) if source.is_run_fatal() => Err(WalkError::Aborted {
            compartment: compartment.name.clone(),
            name: decl.name.clone(),
            resource_type: decl.resource_type.clone(),
            source,
        }),
        Err(e) => Ok(Outcome::failed(format!(
            "Failed to {} {} {} in compartment {}: {}",
            action.verb(),
            decl.resource_type,
            decl.name,
            compartment.name,
            e
        ))),
    }
}
