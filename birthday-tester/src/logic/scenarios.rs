//! Seeded scenarios driving the game logic without a browser.
//!
//! Each scenario is a plain function of a seed so a failure can be replayed
//! from the seed printed in the report.

use anyhow::{Context, Result, bail, ensure};
use birthday_game::challenge::{CHOICE_COUNT, MAX_ANSWER, OPERAND_LIMIT};
use birthday_game::constants::SCREEN_EXIT_MS;
use birthday_game::{
    AnswerOutcome, AssetCatalog, Brother, Choices, EncounterKind, EncounterPhase, EncounterSpec,
    GameSession, Hero, KnownFiles, Mama, MathQuestion, MediaKind, Papa, Partner, Screen,
    SelectionOutcome, TransitionPlan, TransitionStep,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Questions generated per seed by the math scenario.
const QUESTIONS_PER_SEED: usize = 250;

pub type ScenarioCheck = fn(u64) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct LogicScenario {
    pub key: &'static str,
    pub description: &'static str,
    check: ScenarioCheck,
}

impl LogicScenario {
    /// # Errors
    ///
    /// Returns the first broken expectation for `seed`.
    pub fn run(&self, seed: u64) -> Result<()> {
        (self.check)(seed)
    }
}

pub const SCENARIOS: &[LogicScenario] = &[
    LogicScenario {
        key: "full-playthrough",
        description: "Random picks from welcome to finale, then restart",
        check: full_playthrough,
    },
    LogicScenario {
        key: "math-challenge",
        description: "Generated questions keep their answer invariants",
        check: math_challenge,
    },
    LogicScenario {
        key: "asset-fallback",
        description: "Every catalog asset walks its candidate chain in order",
        check: asset_fallback,
    },
    LogicScenario {
        key: "transition-ordering",
        description: "Screen plans activate before narrating and exit cleanly",
        check: transition_ordering,
    },
    LogicScenario {
        key: "pick-guards",
        description: "Duplicate, early and off-screen picks are refused",
        check: pick_guards,
    },
];

#[must_use]
pub fn find_scenario(key: &str) -> Option<&'static LogicScenario> {
    SCENARIOS.iter().find(|scenario| scenario.key == key)
}

/// Scenario keys and descriptions for `--list-scenarios`.
#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description)).collect()
}

fn pick<T: Copy>(rng: &mut ChaCha8Rng, all: &[T]) -> Result<T> {
    all.choose(rng).copied().context("nothing to pick from")
}

/// Apply a plan the way the browser would once its timers have fired.
fn settle(session: &mut GameSession, plan: &TransitionPlan) -> Result<()> {
    ensure!(
        plan.steps().windows(2).all(|w| w[0].at_ms <= w[1].at_ms),
        "plan steps are not in time order: {:?}",
        plan.steps()
    );
    ensure!(
        plan.position(TransitionStep::FinishTransition).is_some(),
        "plan never releases the transition latch"
    );
    session.finish_transition();
    Ok(())
}

fn advance_to(session: &mut GameSession, target: Screen) -> Result<()> {
    while session.current() != target {
        let plan = session
            .advance()
            .with_context(|| format!("flow ended before reaching {}", target.slug()))?;
        settle(session, &plan)?;
    }
    Ok(())
}

/// Open the challenge, miss once when possible, win and pick `option`.
fn beat_encounter(session: &mut GameSession, option: &str) -> Result<()> {
    let question = session.open_challenge()?;
    let encounter = session.encounter_mut().context("no live encounter")?;
    ensure!(
        encounter.answer(question.correct).is_err(),
        "answer accepted while the question was hidden"
    );
    encounter.reveal_question()?;

    if let Some(wrong) = question
        .choices
        .iter()
        .copied()
        .find(|c| !question.is_correct(*c))
    {
        ensure!(
            encounter.answer(wrong)? == AnswerOutcome::Wrong,
            "{wrong} accepted for {}",
            question.prompt()
        );
        ensure!(encounter.attempts() == 1, "wrong answer was not counted");
    }
    ensure!(
        encounter.answer(question.correct)? == AnswerOutcome::Correct,
        "{} rejected for {}",
        question.correct,
        question.prompt()
    );
    ensure!(encounter.options_locked(), "options unlocked mid-defeat");
    encounter.defeat_finished()?;

    match session.choose_option(option)? {
        SelectionOutcome::Advance { .. } => {}
        other => bail!("choosing {option} returned {other:?}"),
    }
    let phase = session.encounter().map(|e| e.phase());
    ensure!(
        phase == Some(EncounterPhase::Chosen),
        "encounter ended in {phase:?}"
    );
    Ok(())
}

fn full_playthrough(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let hero = pick(&mut rng, Hero::ALL)?;
    let brother = pick(&mut rng, Brother::ALL)?;
    let mama = pick(&mut rng, Mama::ALL)?;
    let papa = pick(&mut rng, Papa::ALL)?;
    let mut chosen: Vec<(EncounterKind, &'static str)> = Vec::new();

    let mut session = GameSession::new(seed);
    let plan = session.start();
    settle(&mut session, &plan)?;
    let mut visited = vec![session.current()];

    loop {
        match session.current() {
            Screen::HeroSelection => match session.pick_hero(hero)? {
                SelectionOutcome::Advance { .. } => {}
                other => bail!("hero pick returned {other:?}"),
            },
            screen @ (Screen::BrotherSelection | Screen::MamaSelection | Screen::PapaSelection) => {
                let partner = match screen {
                    Screen::BrotherSelection => Partner::Brother(brother),
                    Screen::MamaSelection => Partner::Mama(mama),
                    _ => Partner::Papa(papa),
                };
                match session.pick_partner(partner)? {
                    SelectionOutcome::TeamUp { preview, .. } => ensure!(
                        preview == partner.team_up_asset(hero),
                        "{} preview is {}",
                        partner.id(),
                        preview.path_stem()
                    ),
                    other => bail!("{} pick returned {other:?}", partner.id()),
                }
            }
            Screen::TeamReveal => {
                let team = session.state().choices.team()?;
                ensure!(
                    (team.hero, team.brother, team.mama, team.papa) == (hero, brother, mama, papa),
                    "team reveal shows {team:?}"
                );
            }
            screen => {
                if let Some(spec) = EncounterSpec::for_screen(screen) {
                    let option = pick(&mut rng, &spec.option_ids())?;
                    beat_encounter(&mut session, option)?;
                    chosen.push((spec.kind, option));
                }
            }
        }

        let Some(plan) = session.advance() else {
            break;
        };
        settle(&mut session, &plan)?;
        visited.push(session.current());
    }

    ensure!(
        visited == Screen::ALL,
        "visited {:?}",
        visited.iter().map(|s| s.slug()).collect::<Vec<_>>()
    );

    let (restaurant, attraction, dessert) = session.state().choices.recap();
    ensure!(chosen.len() == 3, "only {} encounters were played", chosen.len());
    for (kind, option) in chosen {
        let recorded = match kind {
            EncounterKind::Restaurant => restaurant.id(),
            EncounterKind::Attraction => attraction.id(),
            EncounterKind::Dessert => dessert.id(),
        };
        ensure!(
            recorded == option,
            "{kind:?} recap shows {recorded}, picked {option}"
        );
    }

    let plan = session.restart();
    settle(&mut session, &plan)?;
    ensure!(
        session.current() == Screen::Welcome,
        "restart landed on {}",
        session.current().slug()
    );
    ensure!(
        session.state().choices == Choices::default(),
        "restart kept picks: {:?}",
        session.state().choices
    );
    Ok(())
}

fn math_challenge(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..QUESTIONS_PER_SEED {
        let question = MathQuestion::generate(&mut rng);
        let prompt = question.prompt();
        ensure!(
            question.a < OPERAND_LIMIT && question.b < OPERAND_LIMIT,
            "operands out of range in {prompt}"
        );
        ensure!(
            question.correct == question.a + question.b,
            "{prompt} claims {}",
            question.correct
        );
        ensure!(
            question.choices.len() == CHOICE_COUNT,
            "{prompt} offers {:?}",
            question.choices
        );
        ensure!(
            question.choices.contains(&question.correct),
            "{prompt} hides its answer among {:?}",
            question.choices
        );
        ensure!(
            question.choices.iter().all(|c| *c <= MAX_ANSWER),
            "{prompt} offers an answer above {MAX_ANSWER}: {:?}",
            question.choices
        );
        let mut distinct = question.choices.clone();
        distinct.sort_unstable();
        distinct.dedup();
        ensure!(
            distinct.len() == CHOICE_COUNT,
            "{prompt} repeats an answer: {:?}",
            question.choices
        );
    }

    let first = MathQuestion::generate(&mut ChaCha8Rng::seed_from_u64(seed));
    let again = MathQuestion::generate(&mut ChaCha8Rng::seed_from_u64(seed));
    ensure!(first == again, "seed {seed} produced {first:?} then {again:?}");
    Ok(())
}

fn asset_fallback(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let catalog = AssetCatalog::full();
    ensure!(!catalog.is_empty(), "asset catalog is empty");

    for request in catalog.requests() {
        let stem = request.path_stem();
        let list = request.candidates();
        ensure!(
            list.first().map(|c| c.kind) == Some(MediaKind::Video),
            "{stem} does not try a video first"
        );

        let missing = request.resolve(&KnownFiles::new());
        ensure!(
            missing.asset.is_placeholder() && missing.probes == list.len(),
            "{stem} with no files resolved to {:?} after {} probes",
            missing.asset,
            missing.probes
        );

        // only this candidate and the ones after it exist
        let index = rng.gen_range(0..list.len());
        let expected = &list[index];
        let known: KnownFiles = list[index..].iter().map(|c| c.path.clone()).collect();
        let found = request.resolve(&known);
        ensure!(
            found.asset.path() == Some(expected.path.as_str()),
            "{stem} resolved to {:?}, expected {}",
            found.asset,
            expected.path
        );
        ensure!(
            found.asset.kind() == Some(expected.kind),
            "{} resolved as {:?}",
            expected.path,
            found.asset.kind()
        );
        ensure!(
            found.probes == index + 1,
            "{stem} took {} probes to reach candidate {}",
            found.probes,
            index + 1
        );
        ensure!(
            found.is_exact() == (index == 0),
            "{stem} exactness misreported for candidate {}",
            index + 1
        );
    }
    Ok(())
}

fn check_plan(screen: Screen, plan: &TransitionPlan, has_previous: bool) -> Result<()> {
    let slug = screen.slug();
    let position = |step: TransitionStep| -> Result<usize> {
        plan.position(step)
            .with_context(|| format!("{slug} plan is missing {step:?}"))
    };

    ensure!(
        position(TransitionStep::Activate(screen))? == 0,
        "{slug} is not activated first"
    );
    let stop = position(TransitionStep::StopNarration)?;
    match screen.narration_track() {
        Some(track) => {
            let disable = position(TransitionStep::DisableInteractions)?;
            let play = position(TransitionStep::PlayNarration(track))?;
            ensure!(
                stop < disable && disable < play,
                "{slug} narrates before locking input"
            );
        }
        None => {
            position(TransitionStep::EnableInteractions)?;
        }
    }

    if has_previous {
        let exit = position(TransitionStep::ExitPrevious)?;
        let remove = position(TransitionStep::RemovePrevious)?;
        let finish = position(TransitionStep::FinishTransition)?;
        ensure!(
            exit < remove && remove < finish,
            "{slug} releases the latch before the old screen is gone"
        );
        let removed_at = plan.steps().get(remove).map(|s| s.at_ms);
        ensure!(
            removed_at == Some(SCREEN_EXIT_MS),
            "{slug} removes the old screen at {removed_at:?}"
        );
    } else {
        ensure!(
            plan.position(TransitionStep::ExitPrevious).is_none(),
            "{slug} exits a screen that never existed"
        );
    }
    Ok(())
}

fn transition_ordering(seed: u64) -> Result<()> {
    let mut session = GameSession::new(seed);
    let mut plan = session.start();
    let mut has_previous = false;

    loop {
        check_plan(session.current(), &plan, has_previous)?;
        ensure!(
            session.advance().is_none(),
            "advance accepted while {} was sliding in",
            session.current().slug()
        );
        settle(&mut session, &plan)?;
        match session.advance() {
            Some(next) => {
                plan = next;
                has_previous = true;
            }
            None => break,
        }
    }

    ensure!(
        session.current() == Screen::FinalCelebration,
        "flow stopped at {}",
        session.current().slug()
    );
    Ok(())
}

fn pick_guards(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = GameSession::new(seed);
    let plan = session.start();
    settle(&mut session, &plan)?;

    ensure!(
        session.pick_hero(Hero::Flash).is_err(),
        "hero pick accepted on the welcome screen"
    );
    ensure!(
        session.choose_option("pizza").is_err(),
        "option pick accepted on the welcome screen"
    );

    advance_to(&mut session, Screen::HeroSelection)?;
    let first = pick(&mut rng, Hero::ALL)?;
    let second = Hero::ALL
        .iter()
        .copied()
        .find(|h| *h != first)
        .context("only one hero exists")?;
    ensure!(
        matches!(session.pick_hero(first)?, SelectionOutcome::Advance { .. }),
        "first hero pick did not advance"
    );
    ensure!(
        session.pick_hero(second)? == SelectionOutcome::Ignored,
        "second hero pick was not ignored"
    );
    ensure!(
        session.state().choices.hero == Some(first),
        "hero changed to {:?}",
        session.state().choices.hero
    );

    let spec = pick(&mut rng, &EncounterSpec::ALL)?;
    advance_to(&mut session, spec.screen)?;
    let option = pick(&mut rng, &spec.option_ids())?;
    ensure!(
        session.choose_option(option).is_err(),
        "{option} picked before the enemy was beaten"
    );
    session.open_challenge()?;
    ensure!(
        session.open_challenge().is_err(),
        "challenge opened twice on {}",
        spec.screen.slug()
    );
    ensure!(
        session.choose_option(option).is_err(),
        "{option} picked during the challenge"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_keys_are_unique_and_listed() {
        let keys: Vec<_> = list_scenarios().into_iter().map(|(key, _)| key).collect();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
        assert!(find_scenario("full-playthrough").is_some());
        assert!(find_scenario("nope").is_none());
    }

    #[test]
    fn every_scenario_passes_on_a_spread_of_seeds() {
        for scenario in SCENARIOS {
            for seed in [0, 1, 42, 1337, u64::MAX] {
                if let Err(err) = scenario.run(seed) {
                    panic!("{} failed for seed {seed}: {err:#}", scenario.key);
                }
            }
        }
    }

    #[test]
    fn beat_encounter_refuses_options_off_an_encounter() {
        let mut session = GameSession::new(9);
        let plan = session.start();
        settle(&mut session, &plan).unwrap();
        assert!(beat_encounter(&mut session, "pizza").is_err());
    }
}
