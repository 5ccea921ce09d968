pub mod vk;

pub use vk::VkApi;
