pub mod gemini_client;
pub mod gemini_narrative_synthesizer;
pub mod gemini_text_embedder;
pub mod google_tts_audio_renderer;
pub mod grounded_search_content_acquisition;
pub mod http_email_notifier;
pub mod news_api_content_acquisition;
