use crate::domain::ports::decision_provider::DecisionContext;
use crate::domain::values::availability::Availability;
use std::fmt::Write;

/// Cap on scored players included in the prompt.
pub const MAX_PLAYERS_IN_PROMPT: usize = 400;

/// Chain-of-thought prompt asking for one JSON decision object.
pub fn build_prompt(context: &DecisionContext) -> String {
    let rules = &context.rules;
    let gw = context.gameweek;

    let bank = context
        .bank
        .map(|b| format!("{:.1}M", b as f64 / 10.0))
        .unwrap_or_else(|| "unknown".into());
    let free = context
        .free_transfers
        .map(|f| f.to_string())
        .unwrap_or_else(|| "an unknown number of".into());
    let chips: Vec<String> = context.chips_available.iter().map(|c| c.to_string()).collect();

    let mut squad = String::new();
    for p in context.squad_players() {
        let _ = write!(
            squad,
            "  id={} {} {} cost={} pts={} value_index={} form={} fixture_diff={}",
            p.id,
            p.web_name,
            p.position.short_name(),
            p.cost,
            p.total_points,
            p.value_index,
            p.form,
            p.fixture_difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".into()),
        );
        if p.status != Availability::Available || p.chance_of_playing.is_some() || !p.news.is_empty() {
            let news: String = p.news.chars().take(80).collect();
            let chance = p
                .chance_of_playing
                .map(|c| c.to_string())
                .unwrap_or_else(|| "null".into());
            let _ = write!(squad, " status={} chance={chance} news={news}", p.status);
        }
        squad.push('\n');
    }
    if squad.is_empty() {
        squad.push_str("  (none)\n");
    }

    let players: Vec<_> = context.players.iter().take(MAX_PLAYERS_IN_PROMPT).collect();
    let players_json = serde_json::to_string(&players).unwrap_or_else(|_| "[]".into());
    let fixtures = if context.fixtures.is_empty() {
        "  (none)".to_string()
    } else {
        context
            .fixtures
            .iter()
            .map(|f| format!("  {f}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are an expert Fantasy Premier League manager. Decide the best moves for {gw}.

Rules:
- Bank: {bank} (prices are in 0.1M units). At most {max_per_team} players from one club.
- Squad: {squad_size} players ({gk} GK, {def} DEF, {mid} MID, {fwd} FWD); {starting} start.
- You have {free} free transfer(s). Each extra transfer costs {hit} points.
- Chips available: [{chips}]. Play a chip only when it is clearly optimal.
- Captain and vice captain must be different members of the squad after transfers.
- Availability matters most: status is available, doubtful, injured, suspended or unavailable. Transfer out or bench injured and suspended players before anything else.

Reason step by step first: who is unlikely to play, which transfers fix that, then other transfers, captain, chip, and which players start. Then output exactly one JSON object:

{{
  "transfers": [{{"element_out": <id>, "element_in": <id>}}],
  "captain_id": <id or null>,
  "vice_captain_id": <id or null>,
  "chip": "none" | "wildcard" | "free_hit" | "bench_boost" | "triple_captain",
  "lineup_order": [<{squad_size} ids>] or null,
  "reasoning": "<short summary>"
}}

lineup_order lists the squad after transfers: the first {starting} start, the rest are the bench in substitution order with the reserve keeper first. Use null to keep the current order.

Current squad:
{squad}
Fixtures for {gw}:
{fixtures}

All players with precomputed stats:
{players_json}
"#,
        max_per_team = rules.max_per_team,
        squad_size = rules.squad_size,
        gk = rules.quota.keepers,
        def = rules.quota.defenders,
        mid = rules.quota.midfielders,
        fwd = rules.quota.forwards,
        starting = rules.starting_size,
        hit = rules.transfer_hit_cost,
        chips = chips.join(", "),
    )
}
