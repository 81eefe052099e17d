use std::io::{self, Read};

use clap::{Parser, Subcommand};
use client::config::ApiConfig;
use client::net::api::ApiClient;
use client::net::error::ApiError;
use client::net::payloads::parse_timestamp;
use client::state::app::AppState;
use client::state::auth::AuthState;
use client::state::board::group_by_status;
use client::state::dashboard::{member_role, open_tasks_for_member, priority_breakdown};
use client::state::forms::{MeetingCreate, NewTask, ProjectCreate, Registration, TaskUpdate};
use client::state::model::{Priority, TaskStatus};
use client::state::timeline::{bucket_by_day, day_key, events_for_day, week_days};
use serde::Serialize;
use time::{Date, OffsetDateTime};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("not logged in; run `pm login` and export PM_API_TOKEN")]
    MissingToken,
    #[error("unknown project `{0}`")]
    UnknownProject(String),
    #[error("invalid date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,
    #[error("read stdin failed: {0}")]
    Stdin(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pm", about = "Project-management backend CLI")]
struct Cli {
    /// Overrides `PM_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `PM_API_TOKEN`.
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the bearer token with the session user.
    Login {
        username: String,
        #[arg(long, env = "PM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Me,
    /// Projects plus the users lifted from their member lists.
    Projects,
    CreateProject {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "member")]
        member_ids: Vec<String>,
    },
    AddMember {
        project_id: String,
        email: String,
    },
    /// Project roster with roles and open task counts.
    Team {
        project_id: String,
    },
    Tasks {
        project_id: String,
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
    /// Tasks grouped into board columns.
    Board {
        project_id: String,
    },
    CreateTask {
        project_id: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_priority, default_value = "Medium")]
        priority: Priority,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    MoveTask {
        task_id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Partial edit; only the flags given are sent.
    UpdateTask {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
    },
    Meetings {
        project_id: String,
    },
    CreateMeeting {
        project_id: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long = "attendee")]
        attendees: Vec<String>,
        #[arg(long)]
        recording_url: Option<String>,
        #[arg(long)]
        transcript: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Turn a meeting transcript into tasks. Reads stdin when no text is given.
    ProcessTranscript {
        meeting_id: String,
        transcript: Option<String>,
    },
    /// Tasks and meetings across all projects for one day, or its week.
    Agenda {
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = false)]
        week: bool,
    },
    /// The session user's assigned tasks counted by priority.
    Dashboard,
    Chat {
        message: String,
        #[arg(long)]
        project: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.set_base_url(&base_url)?;
    }
    if cli.token.is_some() {
        config.token = cli.token;
    }
    let mut api = ApiClient::new(config)?;

    match cli.command {
        Command::Login { username, password } => run_login(&mut api, &username, &password).await,
        Command::Register { name, username, email, password } => {
            let user = api.register(&Registration { name, username, email, password }).await?;
            print_json(&user)
        }
        Command::Me => {
            require_token(&api)?;
            print_json(&api.current_user().await?)
        }
        Command::Projects => {
            require_token(&api)?;
            let mut state = AppState::new();
            state.load_initial_data(api.initial_data().await?);
            print_json(&serde_json::json!({ "projects": state.projects, "users": state.users }))
        }
        Command::CreateProject { name, description, member_ids } => {
            require_token(&api)?;
            print_json(&api.create_project(&ProjectCreate { name, description, member_ids }).await?)
        }
        Command::AddMember { project_id, email } => {
            require_token(&api)?;
            print_json(&api.add_member(&project_id, &email).await?)
        }
        Command::Team { project_id } => run_team(&api, &project_id).await,
        Command::Tasks { project_id, status } => {
            require_token(&api)?;
            print_json(&api.tasks_by_project(&project_id, status).await?)
        }
        Command::Board { project_id } => {
            require_token(&api)?;
            let tasks = api.tasks_by_project(&project_id, None).await?;
            print_json(&group_by_status(&tasks))
        }
        Command::CreateTask { project_id, title, description, priority, assignee, due, tags } => {
            require_token(&api)?;
            let author = api.current_user().await?;
            let task = NewTask { title, description, priority, project_id, assignee_id: assignee, due_date: due, tags };
            print_json(&api.create_task(&task, &author.id).await?)
        }
        Command::MoveTask { task_id, status } => {
            require_token(&api)?;
            print_json(&api.update_task_status(&task_id, status).await?)
        }
        Command::UpdateTask { task_id, title, description, status, priority, tags, start, due, assignee } => {
            require_token(&api)?;
            let update = TaskUpdate {
                title,
                description,
                status,
                priority,
                tags,
                start_date: start,
                due_date: due,
                assignee_id: assignee,
            };
            if update.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            print_json(&api.update_task(&task_id, &update).await?)
        }
        Command::Meetings { project_id } => {
            require_token(&api)?;
            print_json(&api.meetings_by_project(&project_id).await?)
        }
        Command::CreateMeeting {
            project_id,
            title,
            description,
            start,
            end,
            attendees,
            recording_url,
            transcript,
            summary,
        } => {
            require_token(&api)?;
            let meeting = MeetingCreate {
                title,
                description,
                start_date: start,
                end_date: end,
                project_id,
                attendees,
                recording_url,
                transcript,
                summary,
            };
            print_json(&api.create_meeting(&meeting).await?)
        }
        Command::ProcessTranscript { meeting_id, transcript } => {
            require_token(&api)?;
            let transcript = match transcript {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            print_json(&api.process_transcript(&meeting_id, &transcript).await?)
        }
        Command::Agenda { date, week } => run_agenda(&api, date.as_deref(), week).await,
        Command::Dashboard => run_dashboard(&api).await,
        Command::Chat { message, project } => {
            require_token(&api)?;
            println!("{}", api.chat(&message, project.as_deref()).await?);
            Ok(())
        }
    }
}

async fn run_login(api: &mut ApiClient, username: &str, password: &str) -> Result<(), CliError> {
    let user = api.login(username, password).await?;
    let token = api.token().ok_or(CliError::MissingToken)?.to_owned();
    let mut auth = AuthState::default();
    auth.sign_in(user, token);
    tracing::debug!(user_id = auth.user_id(), "session stored");
    print_json(&serde_json::json!({ "accessToken": auth.token, "user": auth.user }))
}

async fn run_team(api: &ApiClient, project_id: &str) -> Result<(), CliError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TeamMember<'a> {
        id: &'a str,
        name: &'a str,
        email: &'a str,
        role: &'static str,
        open_tasks: usize,
    }

    require_token(api)?;
    let mut state = AppState::new();
    state.load_initial_data(api.initial_data().await?);
    if state.project(project_id).is_none() {
        return Err(CliError::UnknownProject(project_id.to_owned()));
    }
    state.replace_project_tasks(project_id, api.tasks_by_project(project_id, None).await?);

    let roster: Vec<TeamMember<'_>> = state
        .project_members(project_id)
        .into_iter()
        .enumerate()
        .map(|(index, user)| TeamMember {
            id: &user.id,
            name: &user.name,
            email: &user.email,
            role: member_role(index),
            open_tasks: open_tasks_for_member(&state.tasks, project_id, &user.id).len(),
        })
        .collect();
    print_json(&roster)
}

async fn run_agenda(api: &ApiClient, date: Option<&str>, week: bool) -> Result<(), CliError> {
    require_token(api)?;
    let day = match date {
        Some(raw) => parse_day(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };
    let state = load_workspace(api).await?;

    if week {
        let buckets = bucket_by_day(&state.tasks, &state.meetings, &week_days(day));
        let rendered: serde_json::Map<String, serde_json::Value> = buckets
            .into_iter()
            .map(|(day, events)| serde_json::to_value(events).map(|value| (day_key(day), value)))
            .collect::<Result<_, _>>()?;
        print_json(&rendered)
    } else {
        print_json(&events_for_day(&state.tasks, &state.meetings, day))
    }
}

async fn run_dashboard(api: &ApiClient) -> Result<(), CliError> {
    require_token(api)?;
    let user = api.current_user().await?;
    let mut state = load_workspace(api).await?;
    let breakdown = priority_breakdown(&state.tasks, &user.id);
    let assigned = state.tasks_assigned_to(&user.id).len();
    state.set_current_user(user);
    print_json(&serde_json::json!({
        "user": state.current_user,
        "assignedTasks": assigned,
        "priorities": breakdown,
    }))
}

/// Projects, users, tasks, and meetings for everything the session can see.
async fn load_workspace(api: &ApiClient) -> Result<AppState, CliError> {
    let mut state = AppState::new();
    state.load_initial_data(api.initial_data().await?);
    let project_ids: Vec<String> = state.projects.iter().map(|p| p.id.clone()).collect();
    for project_id in &project_ids {
        state.replace_project_tasks(project_id, api.tasks_by_project(project_id, None).await?);
        state.replace_project_meetings(project_id, api.meetings_by_project(project_id).await?);
    }
    tracing::debug!(
        projects = state.projects.len(),
        tasks = state.tasks.len(),
        meetings = state.meetings.len(),
        "workspace loaded"
    );
    Ok(state)
}

fn require_token(api: &ApiClient) -> Result<(), CliError> {
    if api.token().is_none() {
        return Err(CliError::MissingToken);
    }
    Ok(())
}

fn parse_day(raw: &str) -> Result<Date, CliError> {
    parse_timestamp(raw)
        .map(OffsetDateTime::date)
        .ok_or_else(|| CliError::InvalidDate(raw.to_owned()))
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(raw).ok_or_else(|| format!("expected one of: {}", labels(TaskStatus::ALL)))
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::parse(raw).ok_or_else(|| format!("expected one of: {}", labels(Priority::ALL)))
}

fn labels<T: std::fmt::Display>(values: [T; 3]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
