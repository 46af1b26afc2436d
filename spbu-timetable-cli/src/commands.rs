use std::{collections::HashSet, fs, path::PathBuf};

use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDate;
use spbu_timetable_core::{
    Error, Session, SessionConfig,
    cache::CachePolicy,
    entities::{Day, Event, Room, Week},
    link::Bind,
    request::Request,
};

/// Everything a command needs: the session and an optional canned response.
pub struct Context {
    session: Session,
    mock: Option<Vec<u8>>,
}

impl Context {
    pub fn new(
        config: Option<PathBuf>,
        base_url: Option<String>,
        mock: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                SessionConfig::from_json_str(&content)?
            }
            None => SessionConfig::default(),
        };
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }

        let mock = mock
            .map(|path| {
                fs::read(&path).with_context(|| format!("Failed to read mock {}", path.display()))
            })
            .transpose()?;

        tracing::debug!("Using API at {}", config.base_url);
        Ok(Self {
            session: Session::with_config(config)?,
            mock,
        })
    }

    /// Substitute the mock payload, if one was given, for the request's response.
    fn primary<T: Bind + Send + 'static>(&self, request: Request<T>) -> Request<T> {
        match &self.mock {
            Some(payload) => request.with_mock(payload.clone()),
            None => request,
        }
    }
}

pub async fn divisions_command(ctx: &Context) -> Result<()> {
    let divisions = ctx.primary(ctx.session.divisions()).await?;
    for division in &divisions {
        println!("{:<8} {}", division.alias, division.name);
    }
    Ok(())
}

pub async fn levels_command(ctx: &Context, alias: &str) -> Result<()> {
    let levels = ctx.primary(ctx.session.study_levels(alias)).await?;
    for level in &levels {
        println!("{}", level.name);
        for combination in &level.combinations {
            println!("  {}", combination.name);
            for year in &combination.admission_years {
                let marker = if year.is_empty { " (no groups)" } else { "" };
                println!(
                    "    {} -> program {}{}",
                    year.year_name, year.study_program_id, marker
                );
            }
        }
    }
    Ok(())
}

pub async fn groups_command(ctx: &Context, program_id: i64) -> Result<()> {
    let groups = ctx.primary(ctx.session.groups(program_id)).await?;
    if groups.is_empty() {
        println!("No groups for program {}", program_id);
    }
    for group in &groups {
        let details: Vec<&str> = [&group.study_form, &group.profiles]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        println!("{:<8} {} {}", group.id, group.name, details.join(", "));
    }
    Ok(())
}

pub async fn week_command(
    ctx: &Context,
    group_id: i64,
    from: Option<NaiveDate>,
    neighbours: bool,
) -> Result<()> {
    let week = ctx.primary(ctx.session.group_week(group_id, from)).await?;
    print_week(&week);

    if neighbours {
        // Chained through the week itself, so these always hit the network.
        if let Some(next) = week.next() {
            println!();
            print_week(&next.await?);
        }
        if let Some(previous) = week.previous() {
            println!();
            print_week(&previous.await?);
        }
    }
    Ok(())
}

pub async fn educators_command(ctx: &Context, query: &str) -> Result<()> {
    let educators = ctx.primary(ctx.session.search_educators(query)).await?;
    println!("Found {} educators", educators.len());
    for educator in &educators {
        println!("{:<8} {}", educator.id, educator.full_name);
        for employment in &educator.employments {
            println!("         {}, {}", employment.position, employment.department);
        }
    }
    Ok(())
}

pub async fn educator_command(
    ctx: &Context,
    id: i64,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<()> {
    let schedule = ctx.primary(ctx.session.educator_schedule(id, range)).await?;
    println!("{}", schedule.long_display_text);
    for day in &schedule.days {
        print_day(day);
    }
    Ok(())
}

pub async fn addresses_command(ctx: &Context) -> Result<()> {
    let addresses = ctx.primary(ctx.session.address_catalog()).await?;
    for address in &addresses {
        println!("{:<38} {}", address.oid, address.name);
    }
    Ok(())
}

pub async fn rooms_command(ctx: &Context, oid: &str) -> Result<()> {
    let addresses = ctx.session.addresses(CachePolicy::UseCache).await?;
    let address = addresses
        .iter()
        .find(|address| address.oid == oid)
        .ok_or_else(|| anyhow!("Unknown address: {}", oid))?;

    let request = ctx.primary(address.rooms_request());
    let rooms = address.rooms_from(CachePolicy::UseCache, request).await?;
    println!("{} ({} rooms)", address.name, rooms.len());
    for room in &rooms {
        println!("  {}", describe_room(room));
    }
    Ok(())
}

pub async fn resolve_command(ctx: &Context, group_id: i64, from: Option<NaiveDate>) -> Result<()> {
    let mut week = ctx.primary(ctx.session.group_week(group_id, from)).await?;
    println!("{} ({})", week.group_display_name, week.display_text);

    let mut seen = HashSet::new();
    let mut resolved = 0;
    for location in week.locations_mut() {
        if !seen.insert(location.display_name.clone()) {
            continue;
        }
        match location.resolve_room(CachePolicy::UseCache).await {
            Ok(room) => {
                resolved += 1;
                let building = room
                    .address()
                    .map(|address| address.name.clone())
                    .unwrap_or_default();
                println!(
                    "  ✓ {} -> {} [{}]",
                    location.display_name,
                    describe_room(&room),
                    building
                );
            }
            Err(Error::NoMatchingRoom(name)) => println!("  ✗ {}", name),
            Err(e) => return Err(e.into()),
        }
    }

    println!("Resolved {} of {} locations", resolved, seen.len());
    Ok(())
}

pub async fn board_command(ctx: &Context, alias: &str) -> Result<()> {
    let board = ctx.primary(ctx.session.event_board(alias)).await?;
    println!("{}", board.title);
    if board.days.is_empty() {
        println!("  no events");
    }
    for day in &board.days {
        println!("  {}", day.display_text);
        for event in &day.events {
            println!("    {} {}", event.time_interval, event.subject);
            if let Some(locations) = &event.locations_display_text {
                println!("      {}", locations);
            }
        }
    }
    Ok(())
}

fn print_week(week: &Week) {
    println!("{} ({})", week.group_display_name, week.display_text);
    if week.days.is_empty() {
        println!("  no events");
    }
    for day in &week.days {
        print_day(day);
    }
}

fn print_day(day: &Day) {
    println!("  {}", day.display_text);
    for event in &day.events {
        print_event(event);
    }
}

fn print_event(event: &Event) {
    let cancelled = if event.is_cancelled { " [cancelled]" } else { "" };
    println!("    {} {}{}", event.time_interval, event.subject, cancelled);
    if let Some(locations) = &event.locations_display_text {
        println!("      {}", locations);
    }
    if let Some(educators) = &event.educators_display_text {
        println!("      {}", educators);
    }
}

fn describe_room(room: &Room) -> String {
    let mut description = room.name.clone();
    if let Some(capacity) = room.capacity {
        description.push_str(&format!(", {} seats", capacity));
    }
    if let Some(seating) = &room.seating {
        description.push_str(&format!(", {}", seating));
    }
    description
}
