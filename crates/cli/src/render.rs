use champscope_core::{
    classify_range, format_number, has_placeholders, AbilityText, Champion, FacetReport,
    FlagFacet, RangeClass, MAX_LEVEL,
};

fn range_label(range: f64) -> String {
    match classify_range(range) {
        RangeClass::None => "-".to_string(),
        RangeClass::Finite(value) => format_number(value),
        RangeClass::Global => "global".to_string(),
    }
}

fn join_keys<I, T>(items: I, key: impl Fn(T) -> &'static str) -> String
where
    I: IntoIterator<Item = T>,
{
    let keys: Vec<&str> = items.into_iter().map(key).collect();
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join(", ")
    }
}

pub fn champion_row(champion: &Champion, local: bool) -> String {
    let ranges: Vec<String> = champion
        .spell_ranges
        .iter()
        .map(|(slot, range)| format!("{}:{}", slot.label(), range_label(*range)))
        .collect();
    format!(
        "{:<16} {:>5}  dps {:>6}/{:<7} {}  [{}]",
        champion.name.pick(local),
        format_number(champion.attack_range),
        format!("{:.1}", champion.dps0),
        format!("{:.1}", champion.dps18),
        ranges.join(" "),
        join_keys(champion.roles.iter().copied(), |role| role.key()),
    )
}

fn slot_cells(facet: &FlagFacet) -> String {
    facet
        .slot_counts
        .iter()
        .map(|(slot, count)| {
            let marker = if *facet.slot_disabled.get(slot) { "x" } else { " " };
            format!("{}{:>3}{}", slot.label(), count, marker)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn facet_table(report: &FacetReport) -> String {
    let mut out = format!("{:<16} {:>5}  per slot\n", "flag", "any");
    for facet in &report.flags {
        let state = if facet.row_disabled {
            " (no slot)"
        } else if facet.disabled {
            " (off)"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:<16} {:>5}  {}{}\n",
            facet.key.label(),
            facet.any_count,
            slot_cells(facet),
            state
        ));
    }
    out.push_str(&format!("{:<16} {:>5} {:>5}\n", "role", "or", "and"));
    for facet in &report.roles {
        let state = if facet.disabled { " (off)" } else { "" };
        out.push_str(&format!(
            "{:<16} {:>5} {:>5}{}\n",
            facet.role.key(),
            facet.or_count,
            facet.and_count,
            state
        ));
    }
    let bounds = &report.bounds;
    let spell_bounds: Vec<String> = bounds
        .max_spell_range
        .iter()
        .map(|(slot, max)| format!("{}<={}", slot.label(), format_number(*max)))
        .collect();
    out.push_str(&format!(
        "bounds: range<={} {} dps0<={:.1} dps18<={:.1}\n",
        format_number(bounds.max_attack_range),
        spell_bounds.join(" "),
        bounds.max_dps0,
        bounds.max_dps18
    ));
    out
}

fn ability_block(ability: &AbilityText) -> String {
    let label = ability.slot.map(|slot| slot.label()).unwrap_or("P");
    let mut out = format!("  [{label}] {}\n", ability.name);
    if !ability.description.is_empty() {
        out.push_str(&format!("      {}\n", ability.description));
    }
    if has_placeholders(&ability.description) {
        out.push_str("      (some values are missing from the data)\n");
    }
    out
}

pub fn champion_detail(champion: &Champion, local: bool) -> String {
    let mut out = format!(
        "{} ({}) - {}\n",
        champion.name.pick(local),
        champion.id,
        champion.title.pick(local)
    );
    out.push_str(&format!(
        "roles: {}\n",
        join_keys(champion.roles.iter().copied(), |role| role.key())
    ));
    out.push_str(&format!(
        "range {}  hp {} -> {}  dps {:.1} -> {:.1}\n",
        format_number(champion.attack_range),
        format_number(champion.stats.health_at(1)),
        format_number(champion.stats.health_at(MAX_LEVEL)),
        champion.dps0,
        champion.dps18
    ));
    out.push_str(&format!(
        "tags: {}\n",
        join_keys(champion.tags.iter().copied(), |tag| tag.key())
    ));
    out.push_str(&format!(
        "damage: {}{}\n",
        join_keys(champion.damage_types.iter().copied(), |kind| kind.key()),
        if champion.scales_with_own_health {
            ", scales with health"
        } else {
            ""
        }
    ));
    for (slot, tags) in champion.tags_by_slot.iter() {
        out.push_str(&format!(
            "  {} range {:<7} {}\n",
            slot.label(),
            range_label(*champion.spell_ranges.get(slot)),
            join_keys(tags.iter().copied(), |tag| tag.key())
        ));
    }
    let abilities = champion.abilities.pick(local);
    if let Some(passive) = &abilities.passive {
        out.push_str(&ability_block(passive));
    }
    for spell in &abilities.spells {
        out.push_str(&ability_block(spell));
    }
    out
}
