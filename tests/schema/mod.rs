mod tests_documents;
mod tests_limits;
mod tests_properties;
