//! Condensed prompt-writing guide shown by the `guide` session command.

pub const PROMPT_GUIDE: &str = "\
Writing scene prompts

Order the prompt like this:
  1. Action/goal        what the image should show happening
  2. Subject            who or what: age, count, objects
  3. Attributes         clothing, expression, colour, props
  4. Environment/light  setting, light direction, mood, lens (\"window light, 35mm\")
  5. Style/finish       art style or post-processing (\"ink noir\", \"film grain\")
  6. Constraints        what to avoid (\"no logos\", \"minimal retouching\")
  7. Consistency        reference tags that keep a subject stable across scenes

Reference tags
  [CHARACTER: label]    condition on the character reference with that label
  [BACKGROUND: label]   condition on the background reference with that label
  Only the first tag of each kind conditions a render; all tags are removed
  from the text sent to the model. Use `refs` to see the available labels.

Tips
  - Keep prompts under about 100 words; long or ungrammatical prompts drift.
  - Prefer concrete anchors (\"Rembrandt lighting\", \"f/2.8\") to abstract
    adjectives.
  - Iterate: edit a prompt, regen the scene, keep what worked.
  - Say what must not change (\"keep the pose, change only the sky\").
  - Swap single words (vivid -> muted) to explore variations.
  - Avoid copyrighted characters and trademarks in prompts and references.";
