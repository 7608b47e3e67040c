use log::{info, warn};
use seqdeck_core::{
    Card, CardId, DeckKind, Event, EventBus, HandError, HandManager, HandPhase, HandSlot, Outcome,
    PlayOutcome, SequenceType, Settle, SwapDirection, Tier,
};
use seqdeck_data::{load_stacked_deck, load_table_config, normalize_locale, StackedDeck};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiLocale {
    EnUs,
    ZhCn,
}

impl UiLocale {
    fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value);
        if normalized == "zh_CN" {
            Self::ZhCn
        } else {
            Self::EnUs
        }
    }

    fn text<'a>(self, en: &'a str, zh: &'a str) -> &'a str {
        if matches!(self, Self::ZhCn) {
            zh
        } else {
            en
        }
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    seed: u64,
    config_dir: PathBuf,
    deck: Option<PathBuf>,
    delays: bool,
    locale: UiLocale,
}

const DEFAULT_SEED: u64 = 0xC0FFEE;

#[derive(Default)]
struct LineEditor {
    history: Vec<String>,
    history_path: Option<PathBuf>,
}

impl LineEditor {
    fn new() -> Self {
        let mut editor = Self {
            history_path: default_history_path(),
            ..Self::default()
        };
        editor.load_history();
        editor
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).ok()? == 0 {
            return None;
        }
        let line = line.trim_end_matches(&['\n', '\r'][..]).to_string();
        self.push_history(&line);
        Some(line)
    }

    fn push_history(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if self.history.last().is_some_and(|last| last == line) {
            return;
        }
        self.history.push(line.to_string());
        if self.history.len() > 500 {
            let drop = self.history.len() - 500;
            self.history.drain(0..drop);
        }
    }

    fn load_history(&mut self) {
        let Some(path) = self.history_path.as_ref() else {
            return;
        };
        let Ok(contents) = fs::read_to_string(path) else {
            return;
        };
        self.history = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
    }

    fn save_history(&self) {
        let Some(path) = self.history_path.as_ref() else {
            return;
        };
        let mut contents = self.history.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        if let Err(err) = fs::write(path, contents) {
            warn!("could not save history to {}: {err}", path.display());
        }
    }
}

fn default_history_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SEQDECK_HISTORY") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".seqdeck_cli_history"))
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut seed = DEFAULT_SEED;
    let mut config_dir = PathBuf::from("assets");
    let mut deck = None;
    let mut delays = true;
    let mut locale_arg: Option<String> = std::env::var("SEQDECK_LANG").ok();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--no-delay" => delays = false,
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    locale_arg = Some(value.clone());
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().unwrap_or(DEFAULT_SEED);
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    config_dir = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--deck" => {
                if let Some(value) = args.get(idx + 1) {
                    deck = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        seed,
        config_dir,
        deck,
        delays,
        locale: UiLocale::from_opt(locale_arg.as_deref()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if let Err(err) = run_table(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn build_table(options: &CliOptions) -> anyhow::Result<(HandManager, Option<StackedDeck>)> {
    let config = load_table_config(&options.config_dir)?;
    let stacked = match options.deck.as_deref() {
        Some(path) => Some(load_stacked_deck(path)?),
        None => None,
    };
    let hand = HandManager::new(config, options.seed)?;
    Ok((hand, stacked))
}

fn start_table(
    hand: &mut HandManager,
    stacked: Option<&StackedDeck>,
    events: &mut EventBus,
) -> anyhow::Result<()> {
    match stacked {
        Some(deck) => {
            hand.start_stacked(deck.regular.clone(), deck.arithmetic.clone(), events)?
        }
        None => hand.start(events)?,
    }
    Ok(())
}

fn run_table(options: &CliOptions) -> anyhow::Result<()> {
    let locale = options.locale;
    let (mut hand, stacked) = build_table(options)?;
    info!(
        "starting table seed={} stacked={}",
        hand.seed(),
        stacked.is_some()
    );
    let mut events = EventBus::default();
    start_table(&mut hand, stacked.as_ref(), &mut events)?;
    events.drain().for_each(drop);

    let mut line_editor = LineEditor::new();
    println!(
        "{}",
        locale.text(
            "seqdeck: play runs of 3+ cards. Type 'help' for commands.",
            "seqdeck：打出至少3张牌组成数列。输入 help 查看命令。"
        )
    );
    print_table(locale, &hand);
    loop {
        let prompt = prompt_text(locale, &hand);
        let Some(line) = line_editor.read_line(&prompt) else {
            break;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };
        let result = match command {
            "q" | "quit" | "exit" => break,
            "?" | "help" => {
                print_help(locale);
                Ok(())
            }
            "h" | "hand" => {
                print_table(locale, &hand);
                Ok(())
            }
            "s" | "sel" | "select" => toggle_hand(&mut hand, args),
            "o" | "op" => toggle_operator(&mut hand, args),
            "c" | "clear" => hand.deselect_all().map_err(|err| err.to_string()),
            "p" | "play" => play(locale, &mut hand, &mut events, options.delays),
            "drag" => drag(&mut hand, &mut events, args),
            "hover" => hover(&mut hand, args),
            "del" => hand
                .discard_hovered(&mut events)
                .map(|_| ())
                .map_err(|err| err.to_string()),
            "d" | "discard" => discard(&mut hand, &mut events, args),
            "deck" => {
                print_deck(locale, &hand);
                Ok(())
            }
            "played" => {
                print_played(locale, hand.last_played());
                Ok(())
            }
            "new" => start_table(&mut hand, stacked.as_ref(), &mut events)
                .map(|_| print_table(locale, &hand))
                .map_err(|err| err.to_string()),
            _ => Err(format!("unknown command '{command}'")),
        };
        drain_events(locale, &mut events);
        if let Err(err) = result {
            println!("{}: {err}", locale.text("error", "错误"));
        }
    }
    line_editor.save_history();
    Ok(())
}

fn prompt_text(locale: UiLocale, hand: &HandManager) -> String {
    let selected = hand.selected_slots().len();
    format!(
        "[{} {} | {} {}] > ",
        hand.slots().len(),
        locale.text("in hand", "张手牌"),
        selected,
        locale.text("selected", "已选")
    )
}

fn slot_id(hand: &HandManager, index: usize) -> Result<CardId, String> {
    hand.slots()
        .get(index)
        .map(|slot| slot.card.id)
        .ok_or_else(|| format!("no card at index {index}"))
}

fn toggle_hand(hand: &mut HandManager, args: &[&str]) -> Result<(), String> {
    let indices = parse_indices_result(args)?;
    let ids = indices
        .into_iter()
        .map(|index| slot_id(hand, index))
        .collect::<Result<Vec<_>, _>>()?;
    for id in ids {
        hand.activate(id).map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn toggle_operator(hand: &mut HandManager, args: &[&str]) -> Result<(), String> {
    let index = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| format!("invalid index '{raw}'"))?,
        None => 0,
    };
    let id = hand
        .arithmetic()
        .slots()
        .get(index)
        .map(|slot| slot.card.id)
        .ok_or_else(|| format!("no arithmetic card at index {index}"))?;
    hand.activate(id).map(|_| ()).map_err(|err| err.to_string())
}

fn play(
    locale: UiLocale,
    hand: &mut HandManager,
    events: &mut EventBus,
    delays: bool,
) -> Result<(), String> {
    match hand.play_selected(events) {
        Ok(PlayOutcome::Sequence(accepted)) => {
            let names: Vec<String> = accepted.cards.iter().map(Card::name).collect();
            println!(
                "{} {} -> {}",
                locale.text("played", "打出"),
                names.join(", "),
                tier_label(locale, accepted.tier)
            );
        }
        Ok(PlayOutcome::Transform(report)) => {
            for change in &report.changes {
                println!(
                    "{} {}: {} -> {} ({} {})",
                    locale.text("card", "卡牌"),
                    change.card,
                    change.from,
                    change.to,
                    locale.text("raw", "原值"),
                    change.raw
                );
            }
        }
        Ok(PlayOutcome::Ignored) => {
            println!(
                "{}",
                locale.text(
                    "select hand cards for the arithmetic card to act on",
                    "请选择算术牌要作用的手牌"
                )
            );
        }
        Err(HandError::InsufficientSelection { .. } | HandError::InvalidPattern) => return Ok(()),
        Err(err) => return Err(err.to_string()),
    }
    drain_events(locale, events);
    if let Some(task) = hand.pending() {
        if delays {
            thread::sleep(task.delay);
        }
    }
    if let Some(report) = hand.settle(events) {
        if report.drawn > 0 {
            println!("{} {}", locale.text("drew", "补牌"), report.drawn);
        }
    }
    print_table(locale, hand);
    Ok(())
}

fn drag(hand: &mut HandManager, events: &mut EventBus, args: &[&str]) -> Result<(), String> {
    let Some((from, path)) = args.split_first() else {
        return Err("usage: drag <index> <x> [x...]".to_string());
    };
    let index = from
        .parse::<usize>()
        .map_err(|_| format!("invalid index '{from}'"))?;
    let id = slot_id(hand, index)?;
    hand.begin_drag(id).map_err(|err| err.to_string())?;
    for raw in path {
        let x = raw
            .parse::<f32>()
            .map_err(|_| format!("invalid position '{raw}'"))?;
        // keep ticking at this position until the hand stops reordering
        while hand
            .drag_to(x, events)
            .map_err(|err| err.to_string())?
            .is_some()
        {}
    }
    hand.end_drag(events).map(|_| ()).map_err(|err| err.to_string())
}

fn hover(hand: &mut HandManager, args: &[&str]) -> Result<(), String> {
    let index = args
        .first()
        .ok_or_else(|| "usage: hover <index>".to_string())?
        .parse::<usize>()
        .map_err(|_| "invalid index".to_string())?;
    let id = slot_id(hand, index)?;
    hand.hover(id).map_err(|err| err.to_string())
}

fn discard(hand: &mut HandManager, events: &mut EventBus, args: &[&str]) -> Result<(), String> {
    let mut indices = parse_indices_result(args)?;
    indices.sort_unstable();
    indices.dedup();
    let ids = indices
        .into_iter()
        .map(|index| slot_id(hand, index))
        .collect::<Result<Vec<_>, _>>()?;
    for id in ids {
        hand.discard(id, events).map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn print_help(locale: UiLocale) {
    let rows = [
        ("hand | h", "show the table", "显示牌桌"),
        ("sel | s <idx..>", "toggle hand cards (1,3 or 2-4)", "切换手牌选中（1,3 或 2-4）"),
        ("op | o [idx]", "toggle an arithmetic card", "切换算术牌选中"),
        ("clear | c", "deselect everything", "取消全部选中"),
        ("play | p", "play the selection or apply the arithmetic card", "出牌或使用算术牌"),
        ("drag <idx> <x..>", "drag a card through positions", "拖动卡牌经过各位置"),
        ("hover <idx>", "hover a card", "悬停卡牌"),
        ("del", "discard the hovered card", "弃掉悬停的卡牌"),
        ("discard | d <idx..>", "discard cards", "弃牌"),
        ("deck", "deck counts", "牌库数量"),
        ("played", "last played cards", "上次打出的牌"),
        ("new", "start a new game", "开始新游戏"),
        ("quit | q", "leave", "退出"),
    ];
    for (command, en, zh) in rows {
        println!("  {command:<22} {}", locale.text(en, zh));
    }
}

fn print_table(locale: UiLocale, hand: &HandManager) {
    println!(
        "{} ({} {})",
        locale.text("== Hand ==", "== 手牌 =="),
        hand.slots().len(),
        locale.text("cards", "张")
    );
    print_slots(hand.slots());
    println!("{}", locale.text("== Arithmetic ==", "== 算术牌 =="));
    print_slots(hand.arithmetic().slots());
    if hand.phase() != HandPhase::Idle {
        println!("{}: {:?}", locale.text("phase", "阶段"), hand.phase());
    }
}

fn print_slots(slots: &[HandSlot]) {
    for slot in slots {
        let marker = if slot.selected { '*' } else { ' ' };
        println!(
            "{:>4} {marker} {:<14} {}",
            slot.visual_index,
            slot.card.name(),
            slot.card.id
        );
    }
}

fn print_deck(locale: UiLocale, hand: &HandManager) {
    println!(
        "{}: {} ({} {})",
        locale.text("regular deck", "普通牌库"),
        hand.deck().len(),
        hand.deck().discard.len(),
        locale.text("discarded", "弃牌")
    );
    println!(
        "{}: {}",
        locale.text("arithmetic deck", "算术牌库"),
        hand.arithmetic().deck().len()
    );
}

fn print_played(locale: UiLocale, cards: &[Card]) {
    if cards.is_empty() {
        println!("{}", locale.text("nothing played yet", "尚未出牌"));
        return;
    }
    let names: Vec<String> = cards.iter().map(Card::name).collect();
    println!("{}: {}", locale.text("last played", "上次打出"), names.join(", "));
}

fn sequence_label(locale: UiLocale, kind: SequenceType) -> &'static str {
    match kind {
        SequenceType::Arithmetic => locale.text("arithmetic", "等差数列"),
        SequenceType::Geometric => locale.text("geometric", "等比数列"),
        SequenceType::Increasing => locale.text("increasing", "递增数列"),
        SequenceType::Decreasing => locale.text("decreasing", "递减数列"),
        SequenceType::Odd => locale.text("all odd", "奇数列"),
        SequenceType::Even => locale.text("all even", "偶数列"),
        SequenceType::Fibonacci => locale.text("fibonacci", "斐波那契数列"),
    }
}

fn tier_label(locale: UiLocale, tier: Tier) -> String {
    let name = match tier {
        Tier::Base => locale.text("base", "普通"),
        Tier::Medium => locale.text("medium", "中级"),
        Tier::Highest => locale.text("highest", "最高"),
    };
    format!("{name} [{}]", tier.edition().key())
}

fn format_event(locale: UiLocale, event: &Event) -> Option<String> {
    let text = match event {
        Event::Outcome(Outcome::Sequence(kinds)) => {
            let labels: Vec<&str> = kinds
                .iter()
                .map(|kind| sequence_label(locale, *kind))
                .collect();
            labels.join(locale.text(", ", "、"))
        }
        Event::Outcome(Outcome::Invalid) => locale.text("invalid pattern", "无效牌型").to_string(),
        Event::Outcome(Outcome::TooFew { required, .. }) => format!(
            "{} {required} {}",
            locale.text("select at least", "请至少选择"),
            locale.text("cards", "张牌")
        ),
        Event::DeckEmpty { deck } => match deck {
            DeckKind::Regular => locale.text("deck is empty", "牌库空了").to_string(),
            DeckKind::Arithmetic => locale
                .text("arithmetic deck is empty", "算术牌库空了")
                .to_string(),
        },
        Event::SwapCue { card, direction } => {
            let arrow = match direction {
                SwapDirection::Left => "<-",
                SwapDirection::Right => "->",
            };
            format!("{card} {arrow}")
        }
        Event::VisualEffect { card, tier } => format!("{card} {}", tier.edition().key()),
        Event::SlotSettled { card, settle } => {
            if *settle == Settle::Raised {
                format!("{card} ^")
            } else {
                return None;
            }
        }
        Event::RankChanged(_) | Event::HandChanged { .. } | Event::ArithmeticChanged { .. } => {
            return None
        }
    };
    Some(text)
}

fn drain_events(locale: UiLocale, events: &mut EventBus) {
    for event in events.drain() {
        if let Some(text) = format_event(locale, &event) {
            println!("{}: {text}", locale.text("event", "事件"));
        }
    }
}

fn parse_indices_result(args: &[&str]) -> Result<Vec<usize>, String> {
    if args.is_empty() {
        return Err("missing indices".to_string());
    }
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some((start, end)) = part.split_once('-') {
                let start = start
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range start".to_string())?;
                let end = end
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range end".to_string())?;
                if start > end {
                    return Err("range start larger than end".to_string());
                }
                indices.extend(start..=end);
            } else {
                let idx = part
                    .parse::<usize>()
                    .map_err(|_| format!("invalid index '{part}'"))?;
                indices.push(idx);
            }
        }
    }
    if indices.is_empty() {
        return Err("missing indices".to_string());
    }
    Ok(indices)
}
