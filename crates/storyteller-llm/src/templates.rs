//! The prompt catalogue.
//!
//! One system instruction per capability. Placeholders use the `{name}`
//! syntax understood by [`PromptVars`]; the JSON examples
//! embedded in the instructions are literal and never match a placeholder.

use crate::prompt::PromptTemplate;

/// Sentence caps for a new story part. Short parts are deliberately more likely.
pub const SENTENCE_CAPS: &[u32] = &[1, 1, 1, 2, 2, 3, 4];

/// Plot twists that may be applied to the next story part.
pub const PLOT_SETTINGS: &[&str] = &[
    "Something absurdly good happens to the main character.",
    "Something absurdly bad happens to the main character.",
    "Introduce a new friendly character.",
    "Introduce a new relevant item.",
    "Advance the story in time (time skip).",
    "Move the story to a new location.",
    "Twist something already known.",
    "End with a cliffhanger.",
];

/// Endings offered when the story is wrapped up.
pub const ENDINGS: &[&str] = &[
    "Ends in a plot twist.",
    "Ends with a moral lesson.",
    "Ends with a happy ending.",
    "Ends with a sad ending.",
];

/// Alternative to a plot setting that steers back towards the premise.
pub const CONVERGE_TO_PREMISE: &str = "Direct the story towards the premise.";

pub const HELLO: PromptTemplate = PromptTemplate::new("hello", "You are a helpful chatbot.");

pub const HELLO_USER: &str = "Hello, who are you?";

pub const IMPROVE_PROMPT: PromptTemplate = PromptTemplate::new(
    "improve_prompt",
    r#"
You are a helpful assistant who rewrites prompts for an {usage}.
1. Read the input prompt.
2. Rewrite it so it works well for an {usage}.
3. Keep the prompt safe and respectful; it must not break any content policy.
4. {info}
5. Return the rewritten prompt as a single paragraph.

Example JSON output:
{
    "old_prompt": "...",
    "new_prompt": "{example}"
}
"#,
);

pub const IMPROVE_PROMPT_USER: PromptTemplate = PromptTemplate::new(
    "improve_prompt_user",
    "Prompt: {prompt}",
);

pub const IMAGE_USAGE: &str = "image generation model to generate drawings";

pub const IMAGE_INFO: &str =
    "Expand it, add more details, and improve it. Remove any mentions of names.";

pub const IMAGE_EXAMPLE: &str = "Childlike drawing with vivid colors of a cat looking at a food bowl.";

pub const STORY_IMAGE: PromptTemplate = PromptTemplate::new(
    "story_image",
    "{content}.\nIn the style of: {style}.",
);

pub const CHARACTER_IMAGE: PromptTemplate = PromptTemplate::new(
    "character_image",
    "Generate an image using the description of the character: {character}.\nUse a realistic style.",
);

pub const INITIALIZE_STORY: PromptTemplate = PromptTemplate::new(
    "initialize_story",
    r#"
You are a great storyteller.
1. Start a story from the input context.
2. Write the opening part of the story.
    - At most {length} sentences.
3. {complexity}
4. The protagonist from the context is the hero of the story.
5. Describe one key moment of this part visually.
    - Describe the surroundings.
    - Do not name the main character.
6. Pick the sentiment of this part from: 'happy', 'sad', 'neutral', 'shocking'.
7. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "text": "Once upon a time a cat named Johnny lived for tuna. One afternoon, while he was playing with his toys, a clatter came from the kitchen. He ran to look and found that his tuna had been stolen!",
    "keymoment": "An open tuna can spilling onto a kitchen floor.",
    "sentiment": "sad",
    "who": ["Johnny"],
    "where": "kitchen",
    "objects": ["tuna", "toys"]
}
"#,
);

pub const ANALYZE_STORY_PARTS: PromptTemplate = PromptTemplate::new(
    "analyze_story_parts",
    r#"
You are a helpful assistant and a great storyteller. Help me analyse a story.
1. The input contains "story", the story told so far, as a list of paragraphs.
2. The input contains "story_parts", a list of candidate continuations, each with a "text".
3. Read each entry of "story_parts" in the light of "story".
4. For every entry produce:
    - an intensity between 0 and 10,
    - an emotion, e.g. 'happy' or 'sad',
    - a positioning, e.g. 'start', 'middle' or 'end',
    - a complexity between 0 and 1.
5. Answer with a JSON object, one analytics entry per story part, in order.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "analytics": [
        {
            "intensity": "8",
            "emotion": "determined",
            "positioning": "middle",
            "complexity": "0.7"
        }
    ]
}
"#,
);

pub const TERMINATE_STORY: PromptTemplate = PromptTemplate::new(
    "terminate_story",
    r#"
You are a great storyteller.
1. Read the story so far.
2. Write the final part of the story.
    - Bring the story to a conclusion.
    - {ending}
3. {complexity}
4. Describe one key moment of this part visually.
    - Describe the surroundings.
    - Do not name the main character.
5. Pick the sentiment of this part from: 'happy', 'sad', 'neutral', 'shocking'.
6. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "part": {
        "text": "Johnny followed the trail of crumbs and found the thief asleep next to his tuna.",
        "keymoment": "A small mouse asleep beside an empty tuna can under the kitchen table.",
        "sentiment": "happy",
        "who": ["Johnny"],
        "where": "kitchen",
        "objects": ["tuna"]
    }
}
"#,
);

pub const GENERATE_ACTIONS: PromptTemplate = PromptTemplate::new(
    "generate_actions",
    r#"
You are a great storyteller.
1. Read the story so far.
2. Suggest {count} distinct actions the main character could take next.
3. Every action must move the story forward.
4. Each action has:
    - title, a few words naming the action,
    - desc, one short sentence with the details.
5. {complexity}
6. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "list": [
        {
            "title": "Investigate",
            "desc": "Johnny sneaks into the kitchen to find the source of the noise."
        },
        {
            "title": "Ignore",
            "desc": "Johnny shrugs off the noise and keeps playing with his toys."
        }
    ]
}
"#,
);

pub const STORY_PART: PromptTemplate = PromptTemplate::new(
    "story_part",
    r#"
You are a great storyteller.
1. The input object looks like:
    {
        "premise": "Johnny needs to find out who stole his tuna.",
        "story": "Once upon a time a cat named Johnny lived for tuna. One afternoon a clatter came from the kitchen.",
        "action": "Investigate"
    }
2. Read the story so far.
3. Continue the story with the main character performing the given action.
4. The next part should:
    - {convergence}
    - {setting}
    - Use at most {length} sentences.
5. Describe one key moment of the new part visually.
    - Describe the surroundings.
    - Do not name the main character.
6. Pick the sentiment of the new part from: 'happy', 'sad', 'neutral', 'shocking'.
7. {complexity}
8. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "part": {
        "text": "He crept into the kitchen and found the tuna can empty!",
        "keymoment": "An empty tuna can rolling across a tiled kitchen floor.",
        "sentiment": "sad",
        "who": ["Johnny"],
        "where": "kitchen",
        "objects": ["tuna"]
    }
}
"#,
);

pub const PREMISE: PromptTemplate = PromptTemplate::new(
    "premise",
    r#"
You are a helpful assistant. Help me come up with story premises for this character.
1. Read the input character.
2. Invent {count} distinct story premises, each in a different place.
3. Every premise has:
    - title, a short title,
    - desc, a short description.
4. {complexity}
5. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "list": [
        {
            "title": "Sky kingdom",
            "desc": "A kingdom above the clouds where the hero must rescue the queen from a jealous dragon."
        }
    ]
}
"#,
);

pub const CHARACTER: PromptTemplate = PromptTemplate::new(
    "character",
    r#"
You are a helpful assistant. Help me understand the drawing in this photo.
1. Describe the drawing briefly.
    - What it shows.
    - Its visual style.
2. List the items that are drawn.
3. Name the character in the drawing.
4. If the character is not a known one, invent a name.
5. Write a short backstory for the character.
6. {complexity}
7. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "image": {
        "items": [
            {"name": "cat", "importance": 0.9}
        ],
        "content": "A cat looking at a food bowl.",
        "style": "Simple crayon drawing with bright colors.",
        "colors": [
            {"color": "black", "usage": "the cat is black"}
        ]
    },
    "character": {
        "fullname": "Johnny the cat",
        "shortname": "Johnny",
        "likes": ["tuna", "playing"],
        "dislikes": ["dogs", "water"],
        "fears": ["being hungry", "being alone"],
        "personality": ["friendly", "gluttonous", "playful"],
        "backstory": "Johnny the cat loves tuna more than anything. He is always hungry, always friendly, and always ready to play."
    }
}
"#,
);

pub const CHARACTER_IMPROV: PromptTemplate = PromptTemplate::new(
    "character_improv",
    r#"
You are a helpful assistant. Help me create the main character of a story from what an actor said and how they moved.
1. Name the main character.
2. Write a short backstory for the character, at most 200 characters.
3. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Fields of the output:
    fullname: full name of the character
    shortname: short name of the character
    likes: what they like
    dislikes: what they dislike
    fears: what they fear
    personality: their three main personality traits
    backstory: the short backstory

Example JSON object:
{
    "character": {
        "fullname": "Johnny the cat",
        "shortname": "Johnny",
        "likes": ["tuna", "playing"],
        "dislikes": ["dogs", "water"],
        "fears": ["being hungry", "being alone"],
        "personality": ["friendly", "gluttonous", "playful"],
        "backstory": "A hungry, friendly cat who would do anything for tuna."
    }
}
"#,
);

pub const CHARACTER_IMPROV_USER: PromptTemplate = PromptTemplate::new(
    "character_improv_user",
    "Dialogue: {transcript}, Motion: {motion}.",
);

pub const TRANSLATE_TEXT: PromptTemplate = PromptTemplate::new(
    "translate_text",
    r#"
Translate text from {source} to {target}.
1. Translate the given text.
2. Return the translation in the target language.

Example JSON object:
{
    "original": "...",
    "translation": "..."
}
"#,
);

pub const TRANSLATE_KEYPOINTS: PromptTemplate = PromptTemplate::new(
    "translate_keypoints",
    r#"
Translate text from {source} to {target}.
1. Translate the given table.
2. Return the translated table in the target language.
3. Keep the keys "head" and "body" untranslated.

Example JSON object:
{
    "head": ["Parte della storia", "Chi", "Dove", "Oggetti"],
    "body": [[1, "Riccardo", "Caltagirone", "Una macchina nera"], [2, ["Riccardo", "Adil"], "Caltagirone", ["Una macchina nera", "Un telefono"]]]
}
"#,
);

pub const TRANSLATE_USER: PromptTemplate = PromptTemplate::new(
    "translate_user",
    "Original text: '{text}'.",
);

pub const PROCESS_MOTION: PromptTemplate = PromptTemplate::new(
    "process_motion",
    "
You are a stunt choreographer. Describe the most important movement in the video and tie it to the story being told. Focus on what the person does and how that movement carries the story forward.
",
);

pub const PROCESS_MOTION_USER: PromptTemplate = PromptTemplate::new(
    "process_motion_user",
    r#"
The description must fit the ongoing story: the movement continues or enriches it. The story so far, for context: {story}.
Answer in JSON with: title, description, emotion, action, keywords.
Example:
{
    "title": "Fist fighting",
    "description": "A person moves from a relaxed stance into a fighting stance, throws several punches, and relaxes again.",
    "emotion": "Focused",
    "action": "Punching",
    "keywords": ["punch", "fighting"]
}
"#,
);

pub const FRAMES_INTRO: &str = "These are video frames in order.";

pub const MOTION_PART: PromptTemplate = PromptTemplate::new(
    "motion_part",
    r#"
You are a great storyteller.
1. The input object contains:
    {
        "premise": the main scenario or conflict of the story,
        "story": the story established so far,
        "action": the main action the character performs,
        "desc": a detailed description of a person's movement, possibly miming tools or objects,
        "emotion": the emotion attached to the action
    }
Example:
    {
        "premise": "Johnny needs to find out who stole his tuna.",
        "story": "Once upon a time a cat named Johnny lived for tuna. One afternoon a clatter came from the kitchen.",
        "action": "Investigate",
        "desc": "A person looking around as if searching for something.",
        "emotion": "Confused"
    }
2. Read the story so far.
3. Continue the story so that the main character really performs the action described in "desc", shaped strongly by the "emotion".
The same action can lead to different outcomes depending on the emotion, e.g.:
    - With "emotion" "Friendly", a thrown fist could be a fist bump.
    - With "emotion" "Hostile", the same fist is a punch.
Bring any tool or object implied by the gesture in "desc" into the story.
Never describe the character miming an action ("raising his hand as if drinking from a cup"). The character performs the real action ("He picked up the cup and drank").
For example:
    - If "desc" shows someone miming a hammer swing, the character actually swings a hammer.
4. The next part should:
    - {convergence}
    - {setting}
    - Use at most {length} sentences.
5. Describe one key moment of the new part visually.
    - Describe the surroundings.
    - Do not name the main character.
6. Pick the sentiment of the new part from: 'happy', 'sad', 'neutral', 'shocking'.
7. {complexity}
8. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "part": {
        "text": "He searched every corner and found that someone had stolen his tuna!",
        "keymoment": "An empty tuna can under a kitchen chair.",
        "sentiment": "sad",
        "who": ["Johnny"],
        "where": "kitchen",
        "objects": ["tuna"]
    }
}
"#,
);

pub const PART_IMPROV: PromptTemplate = PromptTemplate::new(
    "part_improv",
    r#"
You are a great storyteller.
1. The input object contains:
    {
        "premise": the main scenario or conflict of the story,
        "story": the story established so far,
        "action": the main action the character performs,
        "desc": a detailed description of a person's movement, possibly miming tools or objects,
        "emotion": the emotion attached to the action,
        "transcript": what the character said while acting
    }
Example:
    {
        "premise": "Johnny needs to find out who stole his tuna.",
        "story": "Once upon a time a cat named Johnny lived for tuna. One afternoon a clatter came from the kitchen.",
        "action": "Investigate",
        "desc": "A person looking around as if searching for something.",
        "emotion": "Confused",
        "transcript": "Where is it? I heard something."
    }
2. Read the story so far.
3. Continue the story so that the main character really performs the action described in "desc", shaped strongly by the "emotion".
The same action can lead to different outcomes depending on the emotion, e.g.:
    - With "emotion" "Friendly", a thrown fist could be a fist bump.
    - With "emotion" "Hostile", the same fist is a punch.
Bring any tool or object implied by the gesture in "desc" into the story.
Never describe the character miming an action ("raising his hand as if drinking from a cup"). The character performs the real action ("He picked up the cup and drank").
For example:
    - If "desc" shows someone miming a hammer swing, the character actually swings a hammer.
Take the "transcript" of what the character said into account.
4. The next part should:
    - {convergence}
    - {setting}
    - Use at most {length} sentences.
5. Describe one key moment of the new part visually.
    - Describe the surroundings.
    - Do not name the main character.
6. Pick the sentiment of the new part from: 'happy', 'sad', 'neutral', 'shocking'.
7. {complexity}
8. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "part": {
        "text": "He searched every corner and found that someone had stolen his tuna!",
        "keymoment": "An empty tuna can under a kitchen chair.",
        "sentiment": "sad",
        "who": ["Johnny"],
        "where": "kitchen",
        "objects": ["tuna"]
    }
}
"#,
);

pub const IMPROV_INTRO: PromptTemplate = PromptTemplate::new(
    "improv_intro",
    "
You are a performance choreographer who specialises in improvisation.
Analyse and describe the key movements in the video, focusing on how the performer's movement plays with the words or sounds in the audio.
Explain how the movement fits the improvised flow and how it reshapes or enriches the narrative as it unfolds.

1 - Give a description that fits the improvisation and explains how the movement extends or reinterprets the narrative.
2 - Stay consistent with the audio.
",
);

pub const IMPROV_STORY_INTRO: PromptTemplate = PromptTemplate::new(
    "improv_story_intro",
    "
You are a performance choreographer who specialises in improvisation.
Analyse and describe the key movements in the video, focusing on how the performer's movement plays with the words or sounds in the audio.
Explain how the movement fits the improvised flow and ties into the story being told.
Focus on what the person does and says and how the performance carries the story forward.

1 - Give a description that fits the improvisation and explains how the movement extends or reinterprets the narrative.
2 - Stay consistent with the audio.
3 - The description must relate to the ongoing story, as the performance continues or enriches it.
",
);

pub const IMPROV_ENDING_HINTS: PromptTemplate = PromptTemplate::new(
    "improv_ending_hints",
    "{step} - For context, this is the kind of ending the performer is staging: {hints}\n",
);

pub const IMPROV_GUIDE_HINTS: PromptTemplate = PromptTemplate::new(
    "improv_guide_hints",
    "{step} - For context, use these hints to guide the analysis: {hints}\n",
);

pub const IMPROV_HINT_WHO: PromptTemplate = PromptTemplate::new(
    "improv_hint_who",
    "- '{key}': the character the performer plays as protagonist.\n",
);

pub const IMPROV_HINT_WHERE: PromptTemplate = PromptTemplate::new(
    "improv_hint_where",
    "- '{key}': where the story takes place.\n",
);

pub const IMPROV_HINT_WHAT: PromptTemplate = PromptTemplate::new(
    "improv_hint_what",
    "- '{key}': the event that starts the story.\n",
);

pub const IMPROV_OUTPUT: PromptTemplate = PromptTemplate::new(
    "improv_output",
    r#"
{step} - Answer in JSON with: title, description, emotion, action, keywords.
Example:
{
    "title": "Retreating Step",
    "description": "Saying 'I can't face this', the performer takes a slow, hesitant step back, turning slightly away with hunched shoulders as if shielding themselves. The retreat underlines the vulnerability in their voice and the conflict in their words.",
    "emotion": "Fearful",
    "action": "Retreating",
    "keywords": ["step back", "hesitation", "vulnerability", "inner conflict"]
}
"#,
);

pub const IMPROV_USER: PromptTemplate = PromptTemplate::new(
    "improv_user",
    "\nAnalyse this improvised performance together with its audio transcription: '{transcript}'.\n",
);

pub const IMPROV_STORY_USER: PromptTemplate = PromptTemplate::new(
    "improv_story_user",
    "
1 - Analyse this improvised performance together with its audio transcription: '{transcript}'.
2 - For more context, this is the story told so far: '{story}'.
",
);

pub const PREMISE_IMPROV: PromptTemplate = PromptTemplate::new(
    "premise_improv",
    r#"
You are a great storyteller.
1. The input object contains:
    {
        "dialogue": the transcription of the audio of the improv performance,
        "motion": {
            "description": a description of the movement and audio of the performance,
            "emotion": the emotion attached to the action,
            "keywords": keywords describing the performance
        }
    }
Example:
    {
        "dialogue": "Help me, please",
        "motion": {
            "description": "The person sits still with an intense gaze and says 'Help me, please' with a slight change of expression.",
            "emotion": "Vulnerable",
            "keywords": ["vulnerable", "intense", "help"]
        }
    }
2. The performance is the opening of an improvised story.
3. Write a story premise from the description and emotion of the performance.
4. If the input does not say who, where, or what happens, invent the missing parts.
5. Use the character information.
6. Stay faithful to the input.
7. Include:
    - title, a short title,
    - desc, a short description.
8. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "title": "Rescue Mission",
    "desc": "An old man calls out for help, and a rescue mission begins to save him from danger."
}
"#,
);

pub const PREMISE_IMPROV_USER: PromptTemplate = PromptTemplate::new(
    "premise_improv_user",
    "{improv}. Character: {character}",
);

pub const STORY_TO_END: PromptTemplate = PromptTemplate::new(
    "story_to_end",
    r#"
You are a great storyteller.
1. Write an original story opening whose "text" is at most {limit} characters, with:
    - Character: a main character with a few unique traits.
    - Setting: a vivid place where the story happens.
    - Event: an unusual or intriguing situation the character runs into.
2. Build up to a decision or situation the character must respond to, without ending the story.
3. Describe a key moment of this part visually, with its atmosphere and details.
4. Pick the sentiment of this part from: 'happy', 'sad', 'neutral', 'shocking'.
5. Answer with a JSON object.
    - The "text" field stays under {limit} characters.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "text": "Anna Maria stood alone in the clearing, clutching the strange letter she had found in her grandmother's attic.",
    "keymoment": "A quiet clearing among ancient trees, thin sunlight falling across the letter in her hands.",
    "sentiment": "neutral"
}
"#,
);

pub const INIT_HINTS: PromptTemplate = PromptTemplate::new(
    "init_hints",
    r#"
You are a helpful assistant fluent in {language}. Help me come up with prompts to start an improvisation performance.
1. Produce {count} elements with 3 fields each: the first answers 'Who?', the second 'Where?', the third 'What happened?'.
2. 'Who?' is a character that can be the protagonist (for example a clown, a turtle, the Pope).
3. 'Where?' is the place where the story happens.
4. 'What happened?' is a short event that can start the story.
5. Write in {language}.
6. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "list": [
        {
            "{who_key}": "{who_example}",
            "{place_key}": "{place_example}",
            "{what_key}": "{what_example}"
        }
    ]
}
"#,
);

pub const END_HINTS: PromptTemplate = PromptTemplate::new(
    "end_hints",
    r#"
You are a helpful assistant fluent in {language}. Help me come up with possible endings for a story.
1. Produce {count} elements, each with 4 possible endings, one per category:
    - {happy_key}: a joyful or fulfilling resolution.
    - {sad_key}: a melancholy or emotional conclusion.
    - {absurd_key}: a surreal or comically unexpected turn.
    - {catastrophic_key}: a disastrous or intense outcome.
2. Write in {language}.
3. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "list": [
        {
            "{happy_key}": "{happy_example}",
            "{sad_key}": "{sad_example}",
            "{absurd_key}": "{absurd_example}",
            "{catastrophic_key}": "{catastrophic_example}"
        }
    ]
}
"#,
);

pub const TERMINATE_IMPROV: PromptTemplate = PromptTemplate::new(
    "terminate_improv",
    r#"
You are a skilled storyteller.
1. Read the story and the improv performance to understand where the performer wants to go.
2. Write the final part of the story, following the direction the improv implies to reach a satisfying conclusion.
    - Let the improv details and mood guide the ending: {improv}.
    - Reflect hints, decisions, or actions from the improv in the final arc.
    - Stay true to the performer's intent and add nothing else.
3. Describe one key moment of the conclusion visually.
    - Capture the atmosphere and surroundings.
4. Pick the sentiment of this part from: 'happy', 'sad', 'neutral', 'shocking'.
5. Answer with a JSON object.
    - Plain ASCII, no styling.
    - Double quotes around keys and values.

Example JSON object:
{
    "part": {
        "text": "At last the traveller reached the town, tired from the journey but ready to begin again.",
        "keymoment": "Sunrise over a quiet town, warm light on the traveller's face.",
        "sentiment": "happy",
        "who": ["traveller"],
        "where": "town",
        "objects": ["satchel", "map"]
    }
}
"#,
);
