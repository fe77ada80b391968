use crate::infra::{EngineSet, ScoringProfileKind};
use aquaml::error::AppError;
use aquaml::scoring::PredictionResult;
use clap::Args;
use std::collections::HashMap;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Scoring profile to apply
    #[arg(long, value_enum, default_value = "laboratory")]
    pub(crate) profile: ScoringProfileKind,
    /// Measurement as name=value; repeat once per configured parameter
    #[arg(long = "param", value_parser = crate::infra::parse_param)]
    pub(crate) params: Vec<(String, String)>,
    /// Emit the full prediction as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analysis(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        profile,
        params,
        json,
    } = args;

    let engines = EngineSet::new();
    let raw: HashMap<String, String> = params.into_iter().collect();
    let prediction = engines.engine(profile).predict_raw(&raw)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        render_prediction(profile, &prediction);
    }
    Ok(())
}

fn render_prediction(profile: ScoringProfileKind, prediction: &PredictionResult) {
    println!("Profile:  {profile:?}");
    println!("Score:    {}/100", prediction.score);
    println!(
        "Verdict:  {}",
        if prediction.potable {
            "POTABLE"
        } else {
            "NOT POTABLE"
        }
    );
    if let Some(tier) = prediction.tier {
        println!("Tier:     {tier:?}");
    }
    if let Some(confidence) = prediction.confidence {
        println!("Confidence: {confidence}% (advisory)");
    }
    if let Some(algorithm) = &prediction.algorithm {
        println!("Algorithm: {algorithm}");
    }

    if prediction.risk_factors.is_empty() {
        println!("No risk factors detected.");
    } else {
        println!("Risk factors:");
        for factor in &prediction.risk_factors {
            println!("  - {factor}");
        }
    }

    println!("Breakdown:");
    for entry in &prediction.breakdown {
        println!("  {:<16} {:>7.2}", entry.parameter, entry.amount);
    }
}
