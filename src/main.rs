use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use stepwise::{
    error::ScriptError,
    serialization::{Command, Outcome, Session},
    Form, Proof, Theory, TheoryRegistry,
};

/// Checks equational proofs written as stepwise scripts
#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(about = "Checks step by step equational proofs", long_about = None)]
struct Args {
    /// Proof script to check
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// How expressions are printed
    #[arg(long, value_enum, default_value_t = Notation::Text)]
    notation: Notation,

    /// Print every proof as JSON instead of a step listing
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Notation {
    Text,
    Display,
    Markdown,
    Latex,
}

impl From<Notation> for Form {
    fn from(notation: Notation) -> Form {
        match notation {
            Notation::Text => Form::Text,
            Notation::Display => Form::Display,
            Notation::Markdown => Form::Markdown,
            Notation::Latex => Form::Latex,
        }
    }
}

struct Printer {
    form: Form,
    json: bool,
    incomplete: usize,
}

impl Printer {
    fn start(&self, theory: &Theory, proof: &Proof) -> Result<()> {
        if self.json {
            return Ok(());
        }
        let problem = proof.problem();
        let lhs = theory.parse(&problem.lhs)?;
        let rhs = theory.parse(&problem.rhs)?;
        println!("{}", theory.render_equation(&lhs, &rhs, self.form));
        println!("    {}", theory.render(&lhs, self.form));
        Ok(())
    }

    fn step(&self, theory: &Theory, expression: &str, rule: &str) -> Result<()> {
        if !self.json {
            let expression = theory.parse(expression)?;
            println!(
                "  {} {}    [{}]",
                theory.equality().form(self.form),
                theory.render(&expression, self.form),
                rule
            );
        }
        Ok(())
    }

    fn finish(&mut self, registry: &TheoryRegistry, proof: &Proof) -> Result<()> {
        let theory = registry.get(&proof.problem().theory)?;
        let complete = proof.is_complete(theory);
        if !complete {
            self.incomplete += 1;
        }
        if self.json {
            println!("{}", serde_json::to_string_pretty(&proof.export(theory))?);
        } else if complete {
            println!("goal reached\n");
        } else {
            println!("goal not reached\n");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = std::fs::read_to_string(&args.script)
        .with_context(|| format!("could not read {}", args.script.display()))?;
    let mut registry = TheoryRegistry::builtin()?;
    let mut session = Session::new();
    let mut printer = Printer {
        form: args.notation.into(),
        json: args.json,
        incomplete: 0,
    };

    for (i, line) in input.lines().enumerate() {
        let position = || format!("{}:{}", args.script.display(), i + 1);
        let command = match Command::parse(line)
            .map_err(ScriptError::from)
            .with_context(position)?
        {
            Some(command) => command,
            None => continue,
        };
        log::debug!("line {}: {}", i + 1, command);
        let outcome = command
            .apply(&mut registry, &mut session)
            .with_context(position)?;
        match outcome {
            Outcome::TheorySelected(finished) => {
                if let Some(proof) = finished {
                    printer.finish(&registry, &proof)?;
                }
            }
            Outcome::ProofStarted(finished) => {
                if let Some(proof) = finished {
                    printer.finish(&registry, &proof)?;
                }
                if let Some(proof) = session.proof() {
                    printer.start(registry.get(&proof.problem().theory)?, proof)?;
                }
            }
            Outcome::StepAdded(step) => {
                if let Some(name) = session.theory() {
                    printer.step(registry.get(name)?, &step.expression, &step.rule.text)?;
                }
            }
            Outcome::LawAdded => {}
        }
    }

    if let Some(proof) = session.finish() {
        printer.finish(&registry, &proof)?;
    }
    if printer.incomplete > 0 {
        bail!("{} proof(s) did not reach their goal", printer.incomplete);
    }
    Ok(())
}
