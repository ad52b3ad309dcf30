//! Command-line interface for the PropConnect admin console.
//!
//! Subcommands for operating the platform through the backend REST API:
//! - `login` / `logout` / `whoami` - session management
//! - `dashboard` - aggregate statistics, optionally auto-refreshing
//! - `agents`, `properties`, `users`, `inquiries` - record management
//! - `sold list` - sold-properties report with filtering, sorting,
//!   pagination, and CSV export

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{ApiClient, NewAgent, PropertyQuery};
use crate::config::Config;
use crate::dashboard;
use crate::guard;
use crate::models::{
    Inquiry, InquiryStatus, LoginResponse, PropertyType, SoldProperty, TopSellingAgent,
};
use crate::report::{
    self, BedroomBucket, FilterState, PageSize, Pager, ReportQuery, SortDirection, SortField,
    SortState,
};
use crate::session::{Session, SessionStore};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "propconnect")]
#[command(author, version, about = "Admin console for the PropConnect real-estate platform", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "propconnect.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Backend URL override (default comes from the config file)
    #[arg(long, env = "PROPCONNECT_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with an admin account
    Login {
        /// Admin username (prompted for when omitted)
        username: Option<String>,
        /// Admin password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the currently logged-in account
    Whoami,

    /// Show dashboard statistics
    Dashboard {
        /// Keep refreshing on an interval until Ctrl+C
        #[arg(long)]
        watch: bool,
        /// Refresh interval in seconds (default from config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Agent management commands
    #[command(subcommand)]
    Agents(AgentsCommands),

    /// Property management commands
    #[command(subcommand)]
    Properties(PropertiesCommands),

    /// User management commands
    #[command(subcommand)]
    Users(UsersCommands),

    /// Inquiry management commands
    #[command(subcommand)]
    Inquiries(InquiriesCommands),

    /// Sold-properties report
    #[command(subcommand)]
    Sold(SoldCommands),
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommands {
    /// List all agents
    List,
    /// Show details for one agent
    Show { id: i64 },
    /// Register a new agent
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Path to a profile photo to upload
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Update agent fields (repeat --set field=value)
    Update {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Delete an agent
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PropertiesCommands {
    /// List properties (server-side pagination)
    List {
        /// Page number, starting from 1
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        size: u32,
        /// Restrict to one property type
        #[arg(long)]
        property_type: Option<PropertyType>,
        /// Free-text search forwarded to the backend
        #[arg(long)]
        search: Option<String>,
    },
    /// Show details for one property
    Show { id: i64 },
    /// List the properties of one agent
    ByAgent { agent_id: i64 },
    /// Update property fields (repeat --set field=value)
    Update {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a property
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List all registered users
    List,
}

#[derive(Subcommand, Debug)]
pub enum InquiriesCommands {
    /// List all inquiries
    List,
    /// Show full details for one inquiry
    Show { id: i64 },
    /// Update an inquiry's status, optionally attaching a response
    UpdateStatus {
        id: i64,
        #[arg(long)]
        status: InquiryStatus,
        #[arg(long)]
        response: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SoldCommands {
    /// List sold properties with filtering, sorting, and pagination
    List {
        /// Restrict to one agent's sales
        #[arg(long)]
        agent: Option<i64>,
        /// Case-insensitive search over title, city, locality, agent name
        #[arg(long, default_value = "")]
        search: String,
        /// City facet (repeatable)
        #[arg(long = "city")]
        cities: Vec<String>,
        /// Property type facet (repeatable)
        #[arg(long = "property-type")]
        property_types: Vec<PropertyType>,
        #[arg(long, default_value = "")]
        min_price: String,
        #[arg(long, default_value = "")]
        max_price: String,
        /// Bedrooms facet: 1, 2, 3, 4 or 5+ (repeatable)
        #[arg(long = "bedrooms")]
        bedrooms: Vec<BedroomBucket>,
        /// Earliest sold date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest sold date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Sort key: price, date, or title
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort direction (default: desc)
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page: 10, 25, 50, or 100
        #[arg(long, default_value = "10")]
        page_size: PageSize,
        /// Write the filtered set as CSV instead of printing a table;
        /// defaults to sold-properties-<date>.csv when no path is given
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        export: Option<String>,
    },
    /// Show the available facet values for the report filters
    Facets,
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, config: &Config) -> Result<()> {
    let session = Arc::new(SessionStore::load(&config.session.data_dir));

    let mut api_config = config.api.clone();
    if let Some(url) = &cli.api_url {
        api_config.base_url = url.clone();
    }
    let api = Arc::new(ApiClient::new(&api_config, session.clone())?);

    match &cli.command {
        Commands::Login { username, password } => {
            cmd_login(&api, &session, username.as_deref(), password.as_deref()).await
        }
        Commands::Logout => cmd_logout(&session),
        Commands::Whoami => cmd_whoami(&session),
        Commands::Dashboard { watch, interval } => {
            guard::require_admin(&session)?;
            cmd_dashboard(api, config, *watch, *interval).await
        }
        Commands::Agents(command) => {
            guard::require_admin(&session)?;
            match command {
                AgentsCommands::List => cmd_agents_list(&api).await,
                AgentsCommands::Show { id } => cmd_agents_show(&api, *id).await,
                AgentsCommands::Create {
                    username,
                    password,
                    full_name,
                    email,
                    phone,
                    photo,
                } => {
                    cmd_agents_create(
                        &api,
                        NewAgent {
                            username: username.clone(),
                            password: password.clone(),
                            full_name: full_name.clone(),
                            email: email.clone(),
                            phone_number: phone.clone(),
                            photo: photo.clone(),
                        },
                    )
                    .await
                }
                AgentsCommands::Update { id, fields } => cmd_agents_update(&api, *id, fields).await,
                AgentsCommands::Delete { id } => cmd_agents_delete(&api, *id).await,
            }
        }
        Commands::Properties(command) => {
            guard::require_admin(&session)?;
            match command {
                PropertiesCommands::List {
                    page,
                    size,
                    property_type,
                    search,
                } => cmd_properties_list(&api, *page, *size, *property_type, search.clone()).await,
                PropertiesCommands::Show { id } => cmd_properties_show(&api, *id).await,
                PropertiesCommands::ByAgent { agent_id } => {
                    cmd_properties_by_agent(&api, *agent_id).await
                }
                PropertiesCommands::Update { id, fields } => {
                    cmd_properties_update(&api, *id, fields).await
                }
                PropertiesCommands::Delete { id } => cmd_properties_delete(&api, *id).await,
            }
        }
        Commands::Users(UsersCommands::List) => {
            guard::require_admin(&session)?;
            cmd_users_list(&api).await
        }
        Commands::Inquiries(command) => {
            guard::require_admin(&session)?;
            match command {
                InquiriesCommands::List => cmd_inquiries_list(&api).await,
                InquiriesCommands::Show { id } => cmd_inquiries_show(&api, *id).await,
                InquiriesCommands::UpdateStatus {
                    id,
                    status,
                    response,
                } => cmd_inquiries_update(&api, *id, *status, response.as_deref()).await,
            }
        }
        Commands::Sold(SoldCommands::List {
            agent,
            search,
            cities,
            property_types,
            min_price,
            max_price,
            bedrooms,
            from,
            to,
            sort,
            direction,
            page,
            page_size,
            export,
        }) => {
            guard::require_admin(&session)?;
            let query = ReportQuery {
                agent_id: *agent,
                search: search.clone(),
                filters: FilterState {
                    cities: cities.clone(),
                    property_types: property_types.clone(),
                    min_price: min_price.clone(),
                    max_price: max_price.clone(),
                    bedrooms: bedrooms.clone(),
                    date_from: from.map(start_of_day),
                    date_to: to.map(end_of_day),
                },
                sort: match sort {
                    Some(field) => SortState::new(*field, *direction),
                    None => SortState::default(),
                },
            };
            cmd_sold_list(&api, query, *page, *page_size, export.as_deref()).await
        }
        Commands::Sold(SoldCommands::Facets) => {
            guard::require_admin(&session)?;
            cmd_sold_facets(&api).await
        }
    }
}

fn start_of_day(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(0, 0, 0).expect("valid midnight").and_utc()
}

fn end_of_day(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(23, 59, 59).expect("valid time").and_utc()
}

// ============================================================================
// Session commands
// ============================================================================

async fn cmd_login(
    api: &ApiClient,
    session: &SessionStore,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let username = match username {
        Some(u) => u.to_string(),
        None => prompt("Username: ")?,
    };
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt("Password: ")?,
    };

    let response = api
        .login(&username, &password)
        .await
        .context("Login failed")?;

    let message = response.message.clone();
    let username = establish_admin_session(session, response)?;

    println!(
        "[OK] {}",
        message.as_deref().unwrap_or("Welcome to PropConnect Admin")
    );
    println!("Logged in as {}", username);
    Ok(())
}

/// Role gate between a successful login response and the session store: only
/// an ADMIN account may establish a session. Any other role is rejected and
/// a prior session, if one exists, stays untouched.
fn establish_admin_session(session: &SessionStore, response: LoginResponse) -> Result<String> {
    if !response.user_type.is_admin() {
        bail!("Login rejected: this console requires an ADMIN account");
    }

    session.establish(Session {
        username: response.username.clone(),
        user_type: response.user_type,
        token: response.token,
    })?;

    Ok(response.username)
}

fn cmd_logout(session: &SessionStore) -> Result<()> {
    session.clear();
    println!("Logged out.");
    Ok(())
}

fn cmd_whoami(session: &SessionStore) -> Result<()> {
    match session.current() {
        Some(s) => {
            println!("{} ({})", s.username, s.user_type);
            Ok(())
        }
        None => bail!("Not logged in."),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// ============================================================================
// Dashboard
// ============================================================================

async fn cmd_dashboard(
    api: Arc<ApiClient>,
    config: &Config,
    watch: bool,
    interval: Option<u64>,
) -> Result<()> {
    if watch {
        let secs = interval.unwrap_or(config.dashboard.refresh_secs);
        return dashboard::watch(api, secs).await;
    }

    let stats = api
        .dashboard_stats()
        .await
        .context("Failed to fetch dashboard statistics")?;
    print!("{}", dashboard::render(&stats));
    println!();
    Ok(())
}

// ============================================================================
// Agents
// ============================================================================

async fn cmd_agents_list(api: &ApiClient) -> Result<()> {
    let agents = api.agents().await.context("Failed to fetch agents")?;

    if agents.is_empty() {
        println!("No agents found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<22}  {:<28}  {:<16}  {:<10}",
        "ID", "NAME", "EMAIL", "PHONE", "STATUS"
    );
    println!("{}", "-".repeat(90));
    for agent in agents {
        println!(
            "{:<6}  {:<22}  {:<28}  {:<16}  {:<10}",
            agent.id,
            truncate(&agent.full_name, 22),
            truncate(&agent.email, 28),
            truncate(&agent.phone_number, 16),
            agent.status
        );
    }
    println!();
    Ok(())
}

async fn cmd_agents_show(api: &ApiClient, id: i64) -> Result<()> {
    let agent = api.agent(id).await.context("Failed to fetch agent")?;

    println!();
    println!("=== Agent: {} ===", agent.full_name);
    println!();
    println!("ID:        {}", agent.id);
    println!("Username:  {}", agent.username);
    println!("Email:     {}", agent.email);
    println!("Phone:     {}", agent.phone_number);
    println!("Status:    {}", agent.status);
    if let Some(location) = &agent.location {
        println!("Location:  {}", location);
    }
    if let Some(address) = &agent.address {
        println!("Address:   {}", address);
    }
    if let Some(experience) = agent.experience {
        println!("Experience: {} years", experience);
    }
    println!("Created:   {}", agent.created_at);
    println!();
    Ok(())
}

async fn cmd_agents_create(api: &ApiClient, agent: NewAgent) -> Result<()> {
    let created = api
        .create_agent(agent)
        .await
        .context("Failed to create agent")?;
    println!("[OK] Agent created: {} (id {})", created.full_name, created.id);
    Ok(())
}

async fn cmd_agents_update(api: &ApiClient, id: i64, fields: &[String]) -> Result<()> {
    let mut body = serde_json::Map::new();
    for (key, value) in parse_field_args(fields)? {
        body.insert(key, serde_json::Value::String(value));
    }
    let updated = api
        .update_agent(id, &serde_json::Value::Object(body))
        .await
        .context("Failed to update agent")?;
    println!("[OK] Agent updated: {} (id {})", updated.full_name, updated.id);
    Ok(())
}

async fn cmd_agents_delete(api: &ApiClient, id: i64) -> Result<()> {
    api.delete_agent(id).await.context("Failed to delete agent")?;
    println!("[OK] Agent {} deleted.", id);
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

async fn cmd_properties_list(
    api: &ApiClient,
    page: u32,
    size: u32,
    property_type: Option<PropertyType>,
    search: Option<String>,
) -> Result<()> {
    let query = PropertyQuery {
        // Backend pages are zero-based
        page: page.saturating_sub(1),
        size,
        property_type,
        search,
    };
    let result = api
        .properties(&query)
        .await
        .context("Failed to fetch properties")?;

    if result.content.is_empty() {
        println!("No properties found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<32}  {:>12}  {:<16}  {:<14}  {:<10}",
        "ID", "TITLE", "PRICE", "TYPE", "CITY", "STATUS"
    );
    println!("{}", "-".repeat(100));
    for p in &result.content {
        println!(
            "{:<6}  {:<32}  {:>12}  {:<16}  {:<14}  {:<10}",
            p.id,
            truncate(&p.property_title, 32),
            format_price(p.price),
            p.property_type,
            truncate(&p.city, 14),
            p.status
        );
    }
    println!();
    println!(
        "Page {} of {} ({} properties total)",
        result.number + 1,
        result.total_pages.max(1),
        result.total_elements
    );
    println!();
    Ok(())
}

async fn cmd_properties_show(api: &ApiClient, id: i64) -> Result<()> {
    let p = api.property(id).await.context("Failed to fetch property")?;

    println!();
    println!("=== Property: {} ===", p.property_title);
    println!();
    println!("ID:        {}", p.id);
    println!("Price:     {}", format_price(p.price));
    println!("Type:      {} / {}", p.property_type, p.listing_type);
    println!("City:      {}", p.city);
    if let Some(address) = &p.full_address {
        println!("Address:   {}", address);
    }
    if let (Some(bedrooms), Some(bathrooms)) = (p.bedrooms, p.bathrooms) {
        let area = p.area.as_deref().unwrap_or("-");
        println!("Details:   {} BHK | {} Bath | {} sq ft", bedrooms, bathrooms, area);
    }
    println!("Status:    {}", p.status);
    println!("Views:     {}", p.view_count);
    println!("Agent:     {} ({} / {})", p.agent_name, p.agent_email, p.agent_phone);
    println!("Created:   {}", p.created_at);
    println!();
    Ok(())
}

async fn cmd_properties_by_agent(api: &ApiClient, agent_id: i64) -> Result<()> {
    let properties = api
        .properties_by_agent(agent_id)
        .await
        .context("Failed to fetch agent properties")?;

    if properties.is_empty() {
        println!("No properties found for agent {}.", agent_id);
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<36}  {:>12}  {:<16}  {:<10}",
        "ID", "TITLE", "PRICE", "TYPE", "STATUS"
    );
    println!("{}", "-".repeat(90));
    for p in &properties {
        println!(
            "{:<6}  {:<36}  {:>12}  {:<16}  {:<10}",
            p.id,
            truncate(&p.property_title, 36),
            format_price(p.price),
            p.property_type,
            p.status
        );
    }
    println!();
    Ok(())
}

async fn cmd_properties_update(api: &ApiClient, id: i64, fields: &[String]) -> Result<()> {
    let fields = parse_field_args(fields)?;
    let updated = api
        .update_property(id, fields)
        .await
        .context("Failed to update property")?;
    println!("[OK] Property updated: {} (id {})", updated.property_title, updated.id);
    Ok(())
}

async fn cmd_properties_delete(api: &ApiClient, id: i64) -> Result<()> {
    api.delete_property(id)
        .await
        .context("Failed to delete property")?;
    println!("[OK] Property {} deleted.", id);
    Ok(())
}

// ============================================================================
// Users & inquiries
// ============================================================================

async fn cmd_users_list(api: &ApiClient) -> Result<()> {
    let users = api.users().await.context("Failed to fetch users")?;

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<24}  {:<30}  {:<16}  {:<10}",
        "ID", "NAME", "EMAIL", "PHONE", "STATUS"
    );
    println!("{}", "-".repeat(95));
    for user in users {
        println!(
            "{:<6}  {:<24}  {:<30}  {:<16}  {:<10}",
            user.id,
            truncate(&user.full_name, 24),
            truncate(&user.email, 30),
            truncate(&user.phone_number, 16),
            user.status
        );
    }
    println!();
    Ok(())
}

async fn cmd_inquiries_list(api: &ApiClient) -> Result<()> {
    let inquiries = api.inquiries().await.context("Failed to fetch inquiries")?;

    if inquiries.is_empty() {
        println!("No inquiries found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<20}  {:<28}  {:<18}  {:<12}",
        "ID", "FROM", "PROPERTY", "TYPE", "STATUS"
    );
    println!("{}", "-".repeat(95));
    for inquiry in &inquiries {
        println!(
            "{:<6}  {:<20}  {:<28}  {:<18}  {:<12}",
            inquiry.id,
            truncate(&inquiry.full_name, 20),
            truncate(&inquiry.property_title, 28),
            truncate(&inquiry.inquiry_type, 18),
            inquiry.status
        );
    }
    println!();
    Ok(())
}

async fn cmd_inquiries_show(api: &ApiClient, id: i64) -> Result<()> {
    let inquiries = api.inquiries().await.context("Failed to fetch inquiries")?;
    let inquiry = inquiries
        .into_iter()
        .find(|i| i.id == id)
        .with_context(|| format!("Inquiry {} not found", id))?;

    print!("{}", render_inquiry(&inquiry));
    Ok(())
}

fn render_inquiry(inquiry: &Inquiry) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Inquiry #{} ===", inquiry.id);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "From:      {} ({} / {})",
        inquiry.full_name, inquiry.email, inquiry.phone_number
    );
    let _ = writeln!(
        out,
        "Property:  {} ({})",
        inquiry.property_title, inquiry.property_city
    );
    if let Some(agent) = &inquiry.agent_name {
        let _ = writeln!(out, "Agent:     {}", agent);
    }
    let _ = writeln!(out, "Type:      {}", inquiry.inquiry_type);
    let _ = writeln!(out, "Status:    {}", inquiry.status);
    let _ = writeln!(out, "Received:  {}", inquiry.created_at);
    let _ = writeln!(out);
    let _ = writeln!(out, "Message:");
    let _ = writeln!(out, "  {}", inquiry.message);

    if let Some(response) = &inquiry.admin_response {
        let _ = writeln!(out);
        let _ = writeln!(out, "Admin response:");
        let _ = writeln!(out, "  {}", response);
        if let Some(at) = &inquiry.responded_at {
            let _ = writeln!(out, "  (responded {})", at);
        }
    }

    let _ = writeln!(out);
    out
}

async fn cmd_inquiries_update(
    api: &ApiClient,
    id: i64,
    status: InquiryStatus,
    response: Option<&str>,
) -> Result<()> {
    api.update_inquiry_status(id, status, response)
        .await
        .context("Failed to update inquiry")?;
    println!("[OK] Inquiry {} set to {}.", id, status);
    Ok(())
}

// ============================================================================
// Sold-properties report
// ============================================================================

async fn cmd_sold_list(
    api: &ApiClient,
    query: ReportQuery,
    page: usize,
    page_size: PageSize,
    export: Option<&str>,
) -> Result<()> {
    let data = api
        .sold_properties()
        .await
        .context("Failed to fetch sold properties")?;

    if let Some(agent_id) = query.agent_id {
        match report::agent_name_for(&data.sold_properties, agent_id) {
            Some(name) => println!("Filtered by agent: {}", name),
            None => println!("Filtered by agent: #{}", agent_id),
        }
    }

    let visible = report::run(&data.sold_properties, &query);

    if let Some(path) = export {
        let csv = report::to_csv(&visible);
        let path = if path.is_empty() {
            report::default_export_name(chrono::Utc::now().date_naive())
        } else {
            path.to_string()
        };
        std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path))?;
        println!("[OK] Exported {} properties to {}", visible.len(), path);
        return Ok(());
    }

    if let Some(top) = &data.top_selling_agent {
        print_top_agent(top);
    }

    if visible.is_empty() {
        println!("No sold properties found.");
        return Ok(());
    }

    let mut pager = Pager::new(page_size);
    pager.set_page(page, visible.len());
    print_sold_table(pager.slice(&visible));

    if let Some((start, end)) = pager.shown_range(visible.len()) {
        println!(
            "Showing {}-{} of {} results (page {} of {}, {} total sold)",
            start,
            end,
            visible.len(),
            pager.page(),
            pager.total_pages(visible.len()),
            data.total_sold
        );
    }
    println!();
    Ok(())
}

async fn cmd_sold_facets(api: &ApiClient) -> Result<()> {
    let data = api
        .sold_properties()
        .await
        .context("Failed to fetch sold properties")?;

    println!();
    println!("Cities:");
    for city in report::available_cities(&data.sold_properties) {
        println!("  {}", city);
    }
    println!();
    println!("Property types:");
    for t in PropertyType::ALL {
        println!("  {}", t);
    }
    println!();
    println!("Bedrooms: 1, 2, 3, 4, 5+");
    println!("Page sizes: {:?}", report::PAGE_SIZE_MENU);
    println!();
    Ok(())
}

fn print_top_agent(agent: &TopSellingAgent) {
    println!();
    println!("Top Selling Agent: {} ({} sold)", agent.agent_name, agent.sold_count);
    println!("  {} | {}", agent.agent_email, agent.agent_phone);
}

fn print_sold_table(properties: &[&SoldProperty]) {
    println!();
    println!(
        "{:<6}  {:<30}  {:>12}  {:<15}  {:<18}  {:<12}  {:<18}",
        "ID", "TITLE", "PRICE", "TYPE", "LOCATION", "SOLD", "AGENT"
    );
    println!("{}", "-".repeat(125));
    for p in properties {
        println!(
            "{:<6}  {:<30}  {:>12}  {:<15}  {:<18}  {:<12}  {:<18}",
            p.property_id,
            truncate(&p.property_title, 30),
            format_price(p.price),
            p.property_type,
            truncate(&format!("{}, {}", p.locality, p.city), 18),
            p.updated_at.format("%Y-%m-%d"),
            truncate(&p.sold_by.agent_name, 18)
        );
    }
    println!();
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse repeated `--set field=value` arguments.
fn parse_field_args(fields: &[String]) -> Result<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(fields.len());
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .with_context(|| format!("Invalid field argument (expected FIELD=VALUE): {}", field))?;
        parsed.push((key.trim().to_string(), value.to_string()));
    }
    if parsed.is_empty() {
        bail!("No fields given. Repeat --set FIELD=VALUE for each change.");
    }
    Ok(parsed)
}

/// Format a price in rupees with thousands separators. Fractional prices keep
/// their fraction, matching the CSV export.
fn format_price(price: f64) -> String {
    if price.fract() != 0.0 {
        let sign = if price < 0.0 { "-" } else { "" };
        return format!("{}₹{}", sign, price.abs());
    }
    let whole = price as i64;
    let mut digits = whole.abs().to_string();
    let mut groups = Vec::new();
    while digits.len() > 3 {
        groups.push(digits.split_off(digits.len() - 3));
    }
    groups.push(digits);
    groups.reverse();
    let sign = if whole < 0 { "-" } else { "" };
    format!("{}₹{}", sign, groups.join(","))
}

/// Truncate a string to max length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
