use champscope_core::{
    assemble_champion, count_matches, filter_champions, normalize_spell_ranges, AbilitySlot,
    Champion, ChampionRecord, ChampionStats, FacetReport, FilterState, FlagKey, PerSlot,
    RoleFlag, RoleKind, SlotFlag, SpellRecord, TagKind, VarValue, GLOBAL_RANGE,
};

fn spell(name: &str, tooltip: &str, range: f64) -> SpellRecord {
    SpellRecord {
        name: name.to_string(),
        tooltip: tooltip.to_string(),
        range: Some(VarValue::List(vec![VarValue::Number(range)])),
        ..SpellRecord::default()
    }
}

fn record(id: &str, roles: &[&str], spells: Vec<SpellRecord>, ad: f64) -> ChampionRecord {
    ChampionRecord {
        id: id.to_string(),
        name: id.to_string(),
        tags: roles.iter().map(|role| role.to_string()).collect(),
        stats: ChampionStats {
            attack_damage: ad,
            attack_damage_per_level: 3.0,
            attack_speed: 0.65,
            attack_speed_per_level: 2.5,
            attack_range: Some(if roles.contains(&"Marksman") { 550.0 } else { 125.0 }),
            ..ChampionStats::default()
        },
        spells,
        ..ChampionRecord::default()
    }
}

fn roster() -> Vec<Champion> {
    let records = vec![
        record(
            "Ashe",
            &["Marksman", "Support"],
            vec![
                spell("Focus", "Gains attack speed.", 0.0),
                spell("Volley", "Deals physical damage to slowed enemies.", 1200.0),
                spell("Hawkshot", "Reveals terrain.", 25000.0),
                spell("Arrow", "The first champion hit is stunned and takes magic damage.", 25000.0),
            ],
            59.0,
        ),
        record(
            "Leona",
            &["Tank", "Support"],
            vec![
                spell("Shield of Daybreak", "Her next attack will stun and deal magic damage.", 0.0),
                spell("Eclipse", "Gains armor, then deals magic damage.", 0.0),
                spell("Zenith Blade", "Dashes to the last enemy hit, who is rooted.", 900.0),
                spell("Solar Flare", "Enemies in the center are stunned, the rest are slowed.", 1200.0),
            ],
            60.0,
        ),
        record(
            "Annie",
            &["Mage", "Support"],
            vec![
                spell("Disintegrate", "Deals magic damage.", 625.0),
                spell("Incinerate", "Deals magic damage in a cone.", 600.0),
                spell("Molten Shield", "Grants a shield.", 800.0),
                spell("Tibbers", "Summons Tibbers, stunned enemies take magic damage.", 600.0),
            ],
            50.0,
        ),
        record(
            "Garen",
            &["Fighter", "Tank"],
            vec![
                spell("Decisive Strike", "Gains movement speed and silences.", 0.0),
                spell("Courage", "Gains a shield.", 0.0),
                spell("Judgment", "Spins, dealing physical damage.", 0.0),
                spell("Demacian Justice", "Deals true damage.", 400.0),
            ],
            69.0,
        ),
    ];
    let mut champions: Vec<Champion> = records
        .iter()
        .map(|record| assemble_champion(record, record, ".").champion)
        .collect();
    normalize_spell_ranges(&mut champions);
    champions
}

fn ids(champions: &[&Champion]) -> Vec<String> {
    champions.iter().map(|champion| champion.id.clone()).collect()
}

macro_rules! slot_case {
    ($name:ident, $tag:expr, $slot:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let roster = roster();
            let mut filter = FilterState::default();
            filter.tags.insert($tag, SlotFlag::on_slot($slot));
            let found = filter_champions(&roster, &filter);
            assert_eq!(ids(&found), $expected);
        }
    };
}

slot_case!(stun_on_q, TagKind::Stun, AbilitySlot::Q, vec!["Leona"]);
slot_case!(stun_on_r, TagKind::Stun, AbilitySlot::R, vec!["Ashe", "Leona", "Annie"]);
slot_case!(slow_on_w, TagKind::Slow, AbilitySlot::W, vec!["Ashe"]);
slot_case!(shield_on_e, TagKind::Shield, AbilitySlot::E, vec!["Annie"]);
slot_case!(mobility_on_e, TagKind::Mobility, AbilitySlot::E, vec!["Leona"]);
slot_case!(silence_on_w, TagKind::Silence, AbilitySlot::W, Vec::<&str>::new());

#[test]
fn unbounded_ranges_take_the_slot_maximum() {
    let roster = roster();
    let ashe = &roster[0];
    assert_eq!(ashe.id, "Ashe");
    assert_eq!(ashe.spell_ranges.e, 900.0);
    assert_eq!(ashe.spell_ranges.r, 1200.0);

    let mut again = roster.clone();
    assert_eq!(normalize_spell_ranges(&mut again), 0);
    assert_eq!(again, roster);
}

#[test]
fn slots_without_finite_values_stay_put() {
    let mut champions = roster();
    for champion in &mut champions {
        champion.spell_ranges.q = GLOBAL_RANGE;
    }
    normalize_spell_ranges(&mut champions);
    assert!(champions.iter().all(|champion| champion.spell_ranges.q == GLOBAL_RANGE));
}

#[test]
fn range_and_dps_minimums() {
    let roster = roster();
    let mut filter = FilterState {
        min_attack_range: 500.0,
        ..FilterState::default()
    };
    assert_eq!(ids(&filter_champions(&roster, &filter)), vec!["Ashe"]);

    filter.min_attack_range = 0.0;
    filter.min_spell_range = PerSlot {
        r: 1000.0,
        ..PerSlot::default()
    };
    assert_eq!(ids(&filter_champions(&roster, &filter)), vec!["Ashe", "Leona"]);

    filter.min_spell_range = PerSlot::default();
    filter.min_dps0 = 40.0;
    assert_eq!(ids(&filter_champions(&roster, &filter)), vec!["Garen"]);
}

#[test]
fn damage_and_role_combination() {
    let roster = roster();
    let mut filter = FilterState::default();
    filter.enable_flag_spec("physical").expect("physical flag");
    filter.set_role(RoleKind::Support, RoleFlag::and());
    assert_eq!(ids(&filter_champions(&roster, &filter)), vec!["Ashe"]);
}

#[test]
fn narrowing_never_increases_counts() {
    let roster = roster();
    let mut filter = FilterState::default();
    let mut previous = count_matches(&roster, &filter);
    let steps: Vec<Box<dyn Fn(&mut FilterState)>> = vec![
        Box::new(|filter: &mut FilterState| filter.set_role(RoleKind::Support, RoleFlag::or())),
        Box::new(|filter: &mut FilterState| *filter.flag_mut(FlagKey::Tag(TagKind::Stun)) = SlotFlag::any_slot()),
        Box::new(|filter: &mut FilterState| filter.flag_mut(FlagKey::Tag(TagKind::Stun)).slots.r = true),
        Box::new(|filter: &mut FilterState| filter.set_role(RoleKind::Tank, RoleFlag::and())),
        Box::new(|filter: &mut FilterState| filter.min_dps18 = 200.0),
    ];
    for step in steps {
        let report = FacetReport::compute(&roster, &filter);
        step(&mut filter);
        let count = count_matches(&roster, &filter);
        assert!(count <= previous);
        assert!(report.matching >= count);
        previous = count;
    }
    assert_eq!(previous, 0);
}
