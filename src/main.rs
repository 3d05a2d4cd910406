use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use exam_scheduler::core::{schedule_exams, Analyzer};
use exam_scheduler::parser::load_input_from_dir;
use exam_scheduler::reporter::{
    generate_analysis_json, generate_json_report, generate_markdown_report, generate_text_report,
    instructor_schedule, student_schedule, format_entry,
};
use exam_scheduler::types::{InstructorId, MergeValidator, ScheduleResult, StudentId};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "exam-scheduler")]
#[command(about = "Conflict-graph-based university final-exam scheduler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline over a directory of input JSON files
    Schedule {
        /// Directory containing sections.json, students.json, rooms.json, merges.json
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for the schedule + analysis reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-run the analyzer over a previously written schedule.json
    Analyze {
        /// Path to a schedule.json file produced by `schedule`
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing the original input JSON files
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Validate one merge group against a dataset without scheduling
    MergeCheck {
        /// Directory containing sections.json, students.json, rooms.json
        #[arg(short, long)]
        data: PathBuf,

        /// Merge group id, looked up in merges.json
        #[arg(short, long)]
        group: String,
    },

    /// Print one student's or instructor's own exam list from a schedule.json
    Report {
        /// Path to a schedule.json file produced by `schedule`
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing the original input JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Print the schedule for this student id
        #[arg(long)]
        student: Option<String>,

        /// Print the schedule for this instructor name
        #[arg(long)]
        instructor: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule {
            data,
            output,
            format,
            quiet,
        } => run_schedule(&data, &output, &format, quiet),
        Commands::Analyze { schedule, data } => run_analyze(&schedule, &data),
        Commands::MergeCheck { data, group } => run_merge_check(&data, &group),
        Commands::Report {
            schedule,
            data,
            student,
            instructor,
        } => run_report(&schedule, &data, student, instructor),
    }
}

fn run_schedule(data: &PathBuf, output: &PathBuf, format: &str, quiet: bool) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;

    if !quiet {
        for warning in &input.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} sections, {} students, {} rooms, {} merge groups",
            input.dataset.sections.len(),
            input.dataset.students.len(),
            input.dataset.rooms.len(),
            input.merges.len()
        );
    }

    let spinner = if quiet {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message("scheduling exams...");
        Some(bar)
    };

    let result = schedule_exams(&input.dataset, &input.merges, &input.params)?;
    let analysis = Analyzer::analyze(&result, &input.dataset, &input.merges, &input.params);

    if let Some(bar) = spinner {
        bar.finish_with_message("done");
    }

    std::fs::create_dir_all(output)?;
    for fmt in parse_formats(format) {
        match fmt {
            "json" => {
                std::fs::write(output.join("schedule.json"), generate_json_report(&result)?)?;
                std::fs::write(
                    output.join("analysis.json"),
                    generate_analysis_json(&analysis)?,
                )?;
            }
            "markdown" => {
                std::fs::write(
                    output.join("report.md"),
                    generate_markdown_report(&result, &analysis),
                )?;
            }
            "text" => {
                std::fs::write(
                    output.join("report.txt"),
                    generate_text_report(&result, &analysis),
                )?;
            }
            _ => {}
        }
    }

    if quiet {
        println!(
            "{}",
            exam_scheduler::reporter::generate_json_summary(&result, &analysis)?
        );
    } else {
        print_summary(&result, &analysis);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_analyze(schedule_path: &PathBuf, data: &PathBuf) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;
    let content = std::fs::read_to_string(schedule_path).context("failed to read schedule.json")?;
    let result: ScheduleResult = serde_json::from_str(&content)?;

    let analysis = Analyzer::analyze(&result, &input.dataset, &input.merges, &input.params);
    print_summary(&result, &analysis);
    Ok(())
}

fn run_merge_check(data: &PathBuf, group: &str) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;
    let crns = input
        .merges
        .get(group)
        .with_context(|| format!("unknown merge group '{group}'"))?;

    let check = MergeValidator::validate(group, crns, &input.dataset)?;
    println!("total enrollment:   {}", check.total_enrollment);
    println!("max room capacity:  {}", check.max_room_capacity);
    println!(
        "valid:              {}",
        if check.is_valid {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        }
    );
    if let Some(warning) = &check.warning {
        println!("{} {}", "Warning:".yellow(), warning);
    }
    Ok(())
}

fn run_report(
    schedule_path: &PathBuf,
    data: &PathBuf,
    student: Option<String>,
    instructor: Option<String>,
) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;
    let content = std::fs::read_to_string(schedule_path).context("failed to read schedule.json")?;
    let result: ScheduleResult = serde_json::from_str(&content)?;

    if let Some(student_id) = student {
        let id = StudentId(student_id);
        let entries = student_schedule(&result, &input.dataset, &id);
        if entries.is_empty() {
            println!("No scheduled exams for student '{id}'.");
        }
        for entry in &entries {
            println!("{}", format_entry(entry));
        }
    } else if let Some(name) = instructor {
        let id = InstructorId(name);
        let entries = instructor_schedule(&result, &input.dataset, &id);
        if entries.is_empty() {
            println!("No scheduled exams for instructor '{id}'.");
        }
        for entry in &entries {
            println!("{}", format_entry(entry));
        }
    } else {
        let analysis = Analyzer::analyze(&result, &input.dataset, &input.merges, &input.params);
        print_summary(&result, &analysis);
    }

    Ok(())
}

fn print_summary(_result: &ScheduleResult, analysis: &exam_scheduler::core::ScheduleAnalysis) {
    println!("{}", "Schedule summary".bold().cyan());
    println!("  classes:        {}", analysis.statistics.num_classes);
    println!("  students:       {}", analysis.statistics.num_students);
    println!("  rooms used:     {}", analysis.statistics.num_rooms);
    println!("  hard conflicts: {}", analysis.statistics.hard_conflict_count());
    println!("  unplaced exams: {}", analysis.statistics.unplaced_exams);
}

fn parse_formats(format: &str) -> Vec<&str> {
    if format == "all" {
        return vec!["json", "markdown", "text"];
    }
    format
        .split(',')
        .map(|f| f.trim())
        .filter(|f| matches!(*f, "json" | "markdown" | "text"))
        .collect()
}
