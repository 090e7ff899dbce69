pub mod knowledge {
    pub mod default_knowledge;
    pub mod knowledge_base;
    pub mod knowledge_item;
    pub mod knowledge_lookup;
}

pub mod assistant {
    pub mod chat_assistant;
    pub mod response_generator;
    pub mod role_filter;
}

pub mod documents {
    pub mod document_generator;
    pub mod document_layouts;
    pub mod document_templates;
}
