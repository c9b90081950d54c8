//Third-party-dependencies
use clap::{Args, Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;

use hackmate::models::{ClientError, Decision};
use hackmate::utils::{RegistrationForm, TeamApplicationForm};
use hackmate::views::{
    auth, DashboardView, MyTeamsView, NotificationFeed, Reload, Route, TeamDetailView,
    UserDetailView,
};
use hackmate::{Config, HackmateApi, SessionStore};

/// HackMate - find a hackathon team from the terminal
#[derive(Parser, Debug)]
#[command(name = "hackmate")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Session file (overrides HACKMATE_SESSION_PATH)
    #[arg(long, global = true)]
    session: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Prefer HACKMATE_PASSWORD so the password stays out of shell history
        #[arg(long, env = "HACKMATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List open team applications and your notifications
    Dashboard,
    /// Post a new team application
    CreateTeam(CreateTeamArgs),
    /// Ask to join a team
    Join {
        team_id: i64,
        #[arg(short, long, default_value = "")]
        message: String,
    },
    /// Show a team, with its join requests when you lead it
    Team { team_id: i64 },
    /// Accept a pending join request on a team you lead
    Accept {
        #[arg(long)]
        team: i64,
        request_id: i64,
    },
    /// Reject a pending join request on a team you lead
    Reject {
        #[arg(long)]
        team: i64,
        request_id: i64,
    },
    /// Show a user's profile
    User { user_id: i64 },
    /// List the teams you belong to
    MyTeams,
    /// Refresh your notifications
    Notifications,
    /// Open a screen by path, e.g. /team/42 or /user/my-teams
    Open { route: Route },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "HACKMATE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    full_name: String,
    /// Image file uploaded as the profile picture
    #[arg(long)]
    profile_image: Option<PathBuf>,
    /// Repeat for each skill
    #[arg(long = "skill")]
    skills: Vec<String>,
}

#[derive(Args, Debug)]
struct CreateTeamArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    team_name: String,
    #[arg(long, default_value_t = 5)]
    capacity: u32,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Repeat for each required skill
    #[arg(long = "skill")]
    skills: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(2);
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(cli, config).await {
        eprintln!("❌ {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: Config) -> Result<(), ClientError> {
    if let Some(path) = cli.session {
        config.session_path = path;
    }

    let api = HackmateApi::new(&config)?;
    let mut session = SessionStore::hydrate(&config.session_path);

    match cli.command {
        Command::Login { email, password } => {
            let next = auth::login(&api, &mut session, &email, &password).await?;
            println!("Signed in. Continue at {}", next);
            open(next, &api, &session).await
        }
        Command::Register(args) => {
            let form = RegistrationForm {
                email: args.email,
                password: args.password,
                full_name: args.full_name,
                profile_image: args.profile_image,
                skills: args.skills,
            };
            let next = auth::register(&api, &mut session, &form).await?;
            println!("Account created. Continue at {}", next);
            open(next, &api, &session).await
        }
        Command::Logout => {
            let next = auth::logout(&mut session);
            println!("Signed out. Sign in again at {}", next);
            Ok(())
        }
        Command::Whoami => {
            match session.user() {
                Some(user) => println!("{} <{}>  {}", user.full_name, user.email, Route::User(user.id)),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Command::Dashboard => open(Route::Dashboard, &api, &session).await,
        Command::CreateTeam(args) => {
            let form = TeamApplicationForm {
                title: args.title,
                description: args.description,
                team_name: args.team_name,
                capacity: args.capacity,
                hackathon_date: args.date,
                skills: args.skills,
            };
            let mut dashboard = DashboardView::new();
            let created = dashboard.create_team(&api, &session, form).await?;
            println!("Team created: {}", Route::Team(created.team_id));
            print!("{}", dashboard);
            Ok(())
        }
        Command::Join { team_id, message } => {
            let mut dashboard = DashboardView::new();
            dashboard.reload_teams(&api, &session).await?;
            let request = dashboard
                .request_to_join(&api, &session, team_id, &message)
                .await?;
            println!("Join request #{} sent ({}).", request.id, request.status.as_str());
            print!("{}", dashboard);
            Ok(())
        }
        Command::Team { team_id } => open(Route::Team(team_id), &api, &session).await,
        Command::Accept { team, request_id } => {
            decide(&api, &session, team, request_id, Decision::Accepted).await
        }
        Command::Reject { team, request_id } => {
            decide(&api, &session, team, request_id, Decision::Rejected).await
        }
        Command::User { user_id } => open(Route::User(user_id), &api, &session).await,
        Command::MyTeams => open(Route::MyTeams, &api, &session).await,
        Command::Notifications => show(NotificationFeed::new(), &api, &session).await,
        Command::Open { route } => open(route, &api, &session).await,
    }
}

async fn decide(
    api: &HackmateApi,
    session: &SessionStore,
    team_id: i64,
    request_id: i64,
    decision: Decision,
) -> Result<(), ClientError> {
    let mut view = TeamDetailView::new(team_id);
    view.reload(api, session).await?;
    view.set_request_status(api, session, request_id, decision).await?;
    print!("{}", view);
    Ok(())
}

async fn open(route: Route, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError> {
    match route {
        Route::Dashboard => show(DashboardView::new(), api, session).await,
        Route::Team(team_id) => show(TeamDetailView::new(team_id), api, session).await,
        Route::User(user_id) => show(UserDetailView::new(user_id), api, session).await,
        Route::MyTeams => show(MyTeamsView::new(), api, session).await,
        Route::Login => {
            println!("Sign in with: hackmate login --email <EMAIL> --password <PASSWORD>");
            Ok(())
        }
        Route::Register => {
            println!("Create an account with: hackmate register --email <EMAIL> --password <PASSWORD> --full-name <NAME>");
            Ok(())
        }
    }
}

// Load a view and print it; the view renders its own error state
async fn show<V>(mut view: V, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError>
where
    V: Reload + Display + Send,
{
    let result = view.reload(api, session).await;
    print!("{}", view);
    result
}
