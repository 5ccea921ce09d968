use crate::services::VkApi;

#[derive(Clone)]
pub struct AppState {
    pub vk: VkApi,
}

impl AppState {
    pub fn new(vk: VkApi) -> Self {
        Self { vk }
    }
}
