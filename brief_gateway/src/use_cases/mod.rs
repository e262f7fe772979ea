pub mod embedding_vector_index;
pub mod generate_brief;
