use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeList {
    #[serde(default)]
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}
