//! OpenAPI documentation and Swagger UI integration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppContext;

/// OpenAPI documentation for the storyteller API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storyteller API",
        version = "0.1.0",
        description = "Interactive storytelling backend: characters, story parts, improv analysis, translation, and speech",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "/", description = "Default server")
    ),
    paths(
        // Session routes (routes_session.rs)
        super::routes_session::hello,
        super::routes_session::hello_llm,
        super::routes_session::new_session,
        // Character routes (routes_character.rs)
        super::routes_character::create_character,
        super::routes_character::serve_upload,
        // Story routes (routes_story.rs)
        super::routes_story::premise,
        super::routes_story::init_story,
        super::routes_story::story_part,
        super::routes_story::actions,
        super::routes_story::end_story,
        super::routes_story::analyze,
        super::routes_story::story_image,
        super::routes_story::story_to_end,
        // Improv routes (routes_improv.rs)
        super::routes_improv::process_motion,
        super::routes_improv::motion_part,
        super::routes_improv::init_hints,
        super::routes_improv::end_hints,
        super::routes_improv::process_improv,
        super::routes_improv::improv_part,
        super::routes_improv::premise_improv,
        super::routes_improv::character_improv,
        super::routes_improv::character_image_improv,
        super::routes_improv::end_story_improv,
        // Translation routes (routes_translate.rs)
        super::routes_translate::translate,
        super::routes_translate::translate_keypoints,
        // Speech routes (routes_speech.rs)
        super::routes_speech::read_query,
        super::routes_speech::read_body,
        super::routes_speech::speech_to_text,
    ),
    components(
        schemas(
            super::envelope::Envelope,
            super::envelope::EnvelopeKind,
            super::routes_session::SessionResponse,
            super::routes_character::CharacterRequest,
            super::routes_story::StoryRequest,
            super::routes_story::StoryImageRequest,
            super::routes_story::StoryToEndRequest,
            super::routes_improv::MotionRequest,
            super::routes_improv::HintsRequest,
            super::routes_improv::ImprovRequest,
            super::routes_improv::PremiseImprovRequest,
            super::routes_improv::CharacterImprovRequest,
            super::routes_improv::CharacterImageImprovRequest,
            super::routes_improv::EndStoryImprovRequest,
            super::routes_translate::TranslateResponse,
            super::routes_translate::KeypointsRequest,
            super::routes_speech::ReadRequest,
            super::routes_speech::SpeechToTextRequest,
            super::routes_speech::TranscriptResponse,
        )
    ),
    tags(
        (name = "session", description = "Greeting and session endpoints"),
        (name = "character", description = "Character creation from drawings"),
        (name = "story", description = "Classic story flow"),
        (name = "improv", description = "Motion and improvisation flow"),
        (name = "practice", description = "Practice mode"),
        (name = "translate", description = "Translation"),
        (name = "speech", description = "Text-to-speech and speech-to-text"),
    )
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes.
/// - `/api/docs` - Swagger UI
/// - `/api/openapi.json` - Raw OpenAPI JSON document (served by SwaggerUi)
pub fn openapi_routes() -> Router<AppContext> {
    Router::new().merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
}
