use crate::pricing::{ComputeType, Lookup, Named, RateCardIndex};
use crate::scenario::{JobRecord, Tier, TierJobs};
use serde::Serialize;
use tracing::{debug, warn};

/// Priced job row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCost {
    pub name: String,
    pub runtime_hours: f64,
    pub runs_per_month: f64,
    pub compute_type: Named<ComputeType>,
    pub instance_label: String,
    /// `None` when the label did not resolve against the rate card
    pub instance_id: Option<String>,
    pub node_count: u32,
    pub photon_enabled: bool,
    pub spot_enabled: bool,
    /// Driver plus workers, times hours, times runs
    pub effective_units: f64,
    pub dbu_cost: f64,
    pub platform_cost: f64,
    pub infra_cost: f64,
}

impl JobCost {
    pub fn is_resolved(&self) -> bool {
        self.instance_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobCostSummary {
    pub jobs: Vec<JobCost>,
    pub total_platform_cost: f64,
    pub total_infra_cost: f64,
    pub total_dbu_cost: f64,
}

impl JobCostSummary {
    /// Platform plus infrastructure cost
    pub fn monthly_total(&self) -> f64 {
        self.total_platform_cost + self.total_infra_cost
    }
}

/// Job costs of one enabled tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCost {
    pub tier: Tier,
    #[serde(flatten)]
    pub costs: JobCostSummary,
}

/// Typed row for the job's compute type, else whatever row the instance
/// resolves to. An unrecognised compute type never resolves.
pub fn resolve_job<'a>(job: &JobRecord, index: &'a RateCardIndex) -> Lookup<'a> {
    match job.compute_type.known() {
        Some(compute_type) => index
            .lookup_typed(compute_type, &job.instance_label)
            .or_else(|| index.lookup(&job.instance_label)),
        None => Lookup::Unresolved,
    }
}

pub fn compute_job_cost(job: &JobRecord, index: &RateCardIndex) -> JobCost {
    let lookup = resolve_job(job, index);
    if !lookup.is_resolved() {
        warn!(
            job = %job.name,
            compute_type = %job.compute_type,
            instance_label = %job.instance_label,
            "Unresolved job instance, pricing at zero"
        );
    }
    let rates = lookup.rates();

    let billed_nodes = job.node_count as f64 + 1.0;
    let effective_units = billed_nodes * job.runtime_hours * job.runs_per_month;

    JobCost {
        name: job.name.clone(),
        runtime_hours: job.runtime_hours,
        runs_per_month: job.runs_per_month,
        compute_type: job.compute_type.clone(),
        instance_label: job.instance_label.clone(),
        instance_id: lookup.entry().map(|entry| entry.instance_id.clone()),
        node_count: job.node_count,
        photon_enabled: job.photon_enabled,
        spot_enabled: job.spot_enabled,
        effective_units,
        dbu_cost: rates.dbu_per_hour * effective_units,
        platform_cost: rates.rate_per_hour * effective_units,
        // hourly on-demand price of the cluster, not scaled by usage
        infra_cost: rates.on_demand_hourly * billed_nodes,
    }
}

/// Price every job and total the results
pub fn compute_job_costs(jobs: &[JobRecord], index: &RateCardIndex) -> JobCostSummary {
    let mut summary = JobCostSummary::default();
    for job in jobs {
        let cost = compute_job_cost(job, index);
        summary.total_platform_cost += cost.platform_cost;
        summary.total_infra_cost += cost.infra_cost;
        summary.total_dbu_cost += cost.dbu_cost;
        summary.jobs.push(cost);
    }
    debug!(
        jobs = summary.jobs.len(),
        platform = summary.total_platform_cost,
        infra = summary.total_infra_cost,
        "Priced jobs"
    );
    summary
}

/// Price the jobs of every enabled tier
pub fn compute_tier_costs(tiers: &[TierJobs], index: &RateCardIndex) -> Vec<TierCost> {
    tiers
        .iter()
        .filter(|tier| tier.enabled)
        .map(|tier| {
            for job in &tier.jobs {
                if !job.compute_type.known().is_some_and(|ct| tier.tier.allows(ct)) {
                    debug!(tier = %tier.tier, job = %job.name, compute_type = %job.compute_type, "Compute type outside the tier's usual set");
                }
            }
            TierCost {
                tier: tier.tier,
                costs: compute_job_costs(&tier.jobs, index),
            }
        })
        .collect()
}
