use crate::config::{FailurePolicy, PlacementConfig};
use crate::error::{PreconditionError, Result};
use crate::host::{IntersectionOracle, OpeningHost, SizeParameters};
use crate::model::{ConduitCategory, ConduitSegment};

use super::plan::PlanPlacements;
use super::report::{CategoryReport, PlacementReport};

/// Places openings in every wall crossed by a straight conduit.
///
/// Runs the whole pass against a host: checks preconditions, activates the
/// opening template, then plans and materializes each category in its own
/// unit of work. A category is fully planned before any of its openings are
/// created, so new openings never show up as walls within the same category.
#[derive(Debug, Clone, Default)]
pub struct PlaceOpenings {
    config: PlacementConfig,
}

impl PlaceOpenings {
    /// Creates a new placement run.
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Executes the run.
    ///
    /// Unsupported conduits, unresolved levels and (with
    /// [`FailurePolicy::SkipAndContinue`]) failed openings are skipped and
    /// counted in the report.
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] if the conduit model, the opening
    /// template or a 3D context is missing; nothing is placed in that case.
    /// Host errors while opening, committing or rolling back a unit of work
    /// are propagated; units already committed stay applied.
    pub fn execute<H: OpeningHost>(&self, host: &mut H) -> Result<PlacementReport> {
        let source = host
            .conduit_source()
            .ok_or(PreconditionError::MissingConduitModel)?;
        let template = host
            .opening_template(&self.config.template_family)
            .ok_or_else(|| {
                PreconditionError::MissingOpeningTemplate(self.config.template_family.clone())
            })?;
        let context = host
            .active_spatial_context()
            .ok_or(PreconditionError::MissingSpatialContext)?;

        if !host.is_template_active(&template) {
            host.begin_unit("Activate opening template")?;
            if let Err(err) = host.activate_template(&template) {
                host.rollback_unit()?;
                return Err(err.into());
            }
            host.commit_unit()?;
        }

        tracing::info!(categories = ?self.config.categories, "placing openings");

        let mut report = PlacementReport::default();
        for &category in &self.config.categories {
            let category_report = self.place_category(host, &source, &context, &template, category)?;
            report.categories.push(category_report);
        }
        Ok(report)
    }

    fn place_category<H: OpeningHost>(
        &self,
        host: &mut H,
        source: &H::Source,
        context: &H::Context,
        template: &H::Template,
        category: ConduitCategory,
    ) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(category);
        let segments = collect_segments(&*host, source, category, &mut report);

        let plan = {
            let oracle = IntersectionOracle::new(&*host, context);
            PlanPlacements::new(&segments).execute(&oracle)
        };
        report.crossings = plan.crossings;
        report.skipped_crossings = plan.skipped_crossings;

        let size = SizeParameters {
            width: &self.config.width_parameter,
            height: &self.config.height_parameter,
        };

        host.begin_unit(&format!("Place openings for {}", category.plural()))?;
        for placement in &plan.placements {
            match host.materialize_opening(template, placement, size) {
                Ok(_) => report.placed += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        conduit = ?placement.conduit,
                        obstacle = ?placement.obstacle,
                        error = %err,
                        "failed to create opening"
                    );
                    if self.config.failure_policy == FailurePolicy::AbortCategory {
                        host.rollback_unit()?;
                        report.placed = 0;
                        report.aborted = true;
                        tracing::warn!(%category, "unit of work rolled back");
                        log_summary(&report);
                        return Ok(report);
                    }
                }
            }
        }
        host.commit_unit()?;

        log_summary(&report);
        Ok(report)
    }
}

fn log_summary(report: &CategoryReport) {
    tracing::info!(
        category = %report.category,
        conduits = report.conduits,
        skipped_conduits = report.skipped_conduits,
        crossings = report.crossings,
        skipped_crossings = report.skipped_crossings,
        placed = report.placed,
        failed = report.failed,
        aborted = report.aborted,
        "openings placed"
    );
}

/// Reads the straight conduits of one category, skipping the rest.
fn collect_segments<H: OpeningHost>(
    host: &H,
    source: &H::Source,
    category: ConduitCategory,
    report: &mut CategoryReport,
) -> Vec<ConduitSegment<H::Key>> {
    let mut segments = Vec::new();
    for record in host.list_linear_conduits(source, category) {
        match ConduitSegment::from_record(&record) {
            Ok(segment) => segments.push(segment),
            Err(err) => {
                tracing::warn!(conduit = ?record.id, %category, error = %err, "conduit skipped");
                report.skipped_conduits += 1;
            }
        }
    }
    report.conduits = segments.len();
    segments
}
