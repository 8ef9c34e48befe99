use std::fmt::Write;

use buzzer::player_table::PlayerRow;
use console::Style;
use itertools::Itertools;


pub const KEY_HELP: &str = "[b] buzz   [c] clear buzz   [+/-] question   [q] quit";

fn render_buzz_order(buzz_order: &str) -> String {
    if buzz_order.is_empty() {
        Style::new().dim().apply_to("-").to_string()
    } else {
        Style::new().bold().yellow().apply_to(buzz_order).to_string()
    }
}

fn render_player_table(rows: &[PlayerRow]) -> String {
    if rows.is_empty() {
        return "  (no players)\n".to_owned();
    }
    let name_width = rows.iter().map(|row| row.username.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let name = format!("{:<1$}", row.username, name_width);
            format!("  {}  {}\n", name, render_buzz_order(&row.buzz_order))
        })
        .join("")
}

// `q_num` is `None` until the first game state arrives.
pub fn render_game(game_ext_id: &str, q_num: Option<i64>, rows: &[PlayerRow]) -> String {
    let mut out = String::new();
    let q_num = q_num.map_or("?".to_owned(), |q| q.to_string());
    // Writing to a `String` never fails.
    let _ = writeln!(out, "Game {}", Style::new().bold().apply_to(game_ext_id));
    let _ = writeln!(out, "Question {q_num}\n");
    out.push_str(&render_player_table(rows));
    let _ = writeln!(out, "\n{}", Style::new().dim().apply_to(KEY_HELP));
    out
}
