pub mod component;
pub mod field_editor;
pub mod header;
pub mod hint_bar;
pub mod new_page;
pub mod page_editor;
pub mod renderer;
pub mod sidebar;
pub mod text_input;

pub(crate) use component::Component;
pub use field_editor::FieldEditorComponent;
pub use header::HeaderComponent;
pub use hint_bar::HintBarComponent;
pub use new_page::NewPageComponent;
pub use page_editor::PageEditorComponent;
pub use renderer::RendererComponent;
pub use sidebar::SidebarComponent;
