use std::io::{BufRead, Write};

use crate::{
    authoring::prompt::Prompter,
    compose::storyboard::{StoryboardOptions, build_schedule},
    foundation::{core::Fps, error::StoryResult},
    scene::layout::{AUTO_LAYOUT_MAX, default_positions},
    story::{
        document::{CharacterPlacement, Expression, Scene, StoryDocument},
        palette::BUILTIN_BACKGROUND_IDS,
        registry::{CharacterDefinition, CharacterTemplate, character_id_for},
    },
};

/// Settings for an authoring session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthoringOptions {
    /// Frame rate of the generated story.
    pub frame_rate: u32,
    /// Scene length used when the duration prompt is left blank.
    pub default_scene_secs: u64,
    /// Longest scene accepted by the duration prompt.
    pub max_scene_secs: u64,
    /// Most scenes accepted.
    pub max_scenes: u64,
    /// Largest cast accepted.
    pub max_cast: u64,
}

impl Default for AuthoringOptions {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            default_scene_secs: 4,
            max_scene_secs: 60,
            max_scenes: 50,
            max_cast: 10,
        }
    }
}

/// `<slug>.story.json` for a title: lowercase ASCII alphanumerics joined by `-`.
pub fn story_filename(title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "story" } else { &slug };
    format!("{slug}.story.json")
}

/// Walk the author through metadata, cast and scenes and return a validated document.
///
/// The document is checked by building its schedule before it is returned.
#[tracing::instrument(skip_all)]
pub fn run_interactive<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    opts: &AuthoringOptions,
) -> StoryResult<StoryDocument> {
    let fps = Fps::new(opts.frame_rate, 1)?;
    p.say("Story Creator")?;
    p.say("")?;

    let title = p.ask_required("Story title: ")?;
    let theme = p.ask_required("Theme (e.g. Diwali, School, Family): ")?;
    let moral = p.ask_required("Moral/Lesson: ")?;
    let sign_off = Some(p.ask("Closing line (press Enter to skip): ")?).filter(|s| !s.is_empty());
    let scene_count = p.ask_number("Number of scenes (6-8 recommended): ", 1..=opts.max_scenes, None)?;

    let cast = ask_cast(p, opts)?;
    let names: Vec<&str> = cast.iter().map(|c| c.name.as_str()).collect();

    let mut scenes = Vec::with_capacity(scene_count as usize);
    for i in 0..scene_count {
        p.say("")?;
        p.say(&format!("Scene {}/{scene_count}:", i + 1))?;
        let secs = p.ask_number(
            &format!("  Duration in seconds (default {}): ", opts.default_scene_secs),
            1..=opts.max_scene_secs,
            Some(opts.default_scene_secs),
        )?;
        p.say("  Backgrounds:")?;
        let bg = p.ask_choice("  Background: ", &BUILTIN_BACKGROUND_IDS[..])?;
        let narrator = p.ask_required("  Narrator text: ")?;
        let dialogue = Some(p.ask("  Dialogue (press Enter to skip): ")?).filter(|s| !s.is_empty());

        let max_here = cast.len().min(AUTO_LAYOUT_MAX) as u64;
        let count = p.ask_number(
            &format!("  How many characters in this scene? (1-{max_here}): "),
            1..=max_here,
            None,
        )? as usize;
        let slots = default_positions(count).unwrap_or_default();

        let mut characters = Vec::with_capacity(count);
        for (j, slot) in slots.iter().enumerate() {
            p.say(&format!("  Character {} in scene:", j + 1))?;
            let who = p.ask_choice("  Select character: ", &names[..])?;
            let menu: Vec<&str> = Expression::ALL.iter().map(|e| e.as_str()).collect();
            p.say(&format!("  Expressions: {}", menu.join(", ")))?;
            let expression = p.ask_parsed("  Expression (default happy): ", "Unknown expression.", |s| {
                if s.is_empty() {
                    Some(Expression::Happy)
                } else {
                    Expression::parse(s)
                }
            })?;
            characters.push(CharacterPlacement {
                character: cast[who].id.clone(),
                position: Some(*slot),
                expression,
                size: 100.0,
            });
        }

        scenes.push(Scene {
            id: i as u32 + 1,
            duration_frames: fps.secs_to_frames(secs),
            background: BUILTIN_BACKGROUND_IDS[bg].to_owned(),
            narrator,
            dialogue,
            action: None,
            characters,
        });
    }

    let doc = StoryDocument {
        title,
        theme,
        moral,
        sign_off,
        frame_rate: opts.frame_rate,
        language: "English".to_owned(),
        cast,
        backgrounds: Vec::new(),
        scenes,
    };
    let schedule = build_schedule(&doc, &StoryboardOptions::default())?;
    tracing::debug!(total_frames = schedule.total_frames(), "authored story validated");
    Ok(doc)
}

fn ask_cast<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    opts: &AuthoringOptions,
) -> StoryResult<Vec<CharacterDefinition>> {
    p.say("")?;
    p.say("Character templates:")?;
    for (i, t) in CharacterTemplate::ALL.iter().enumerate() {
        p.say(&format!("  {}. {}", i + 1, t.key()))?;
    }
    let count = p.ask_number("How many main characters? (2-3 recommended): ", 1..=opts.max_cast, None)?;

    let keys: Vec<&str> = CharacterTemplate::ALL.iter().map(|t| t.key()).collect();
    let mut cast: Vec<CharacterDefinition> = Vec::with_capacity(count as usize);
    for i in 0..count {
        p.say(&format!("Character {}:", i + 1))?;
        let template = p.ask_parsed(
            &format!("  Template ({}): ", keys.join("/")),
            "Unknown template.",
            CharacterTemplate::parse,
        )?;
        let name = loop {
            let name = p.ask_required("  Name: ")?;
            let id = character_id_for(&name);
            if cast.iter().any(|c| c.id == id) {
                p.say(&format!("  A character with id '{id}' already exists."))?;
                continue;
            }
            break name;
        };
        cast.push(template.instantiate(&name));
    }
    Ok(cast)
}
