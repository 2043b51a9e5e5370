mod concept_tests;
mod loader_tests;
mod retrieval_scenario_tests;
mod snippet_table_tests;
