use crate::models::customer::Customer;

const HEADERS: [&str; 6] = [
    "Customer ID",
    "User ID",
    "First Name",
    "Last Name",
    "Address",
    "Active",
];

/// One line of the search results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub customer_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub active: String,
}

impl From<&Customer> for ResultRow {
    fn from(customer: &Customer) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let address = customer.address.clone().unwrap_or_default();

        Self {
            customer_id: text(&customer.customer_id),
            user_id: text(&customer.user_id),
            first_name: text(&customer.first_name),
            last_name: text(&customer.last_name),
            // street, apartment, city, state - zip
            address: format!(
                "{}, {}, {}, {} - {}",
                text(&address.street),
                text(&address.apartment),
                text(&address.city),
                text(&address.state),
                text(&address.zip_code)
            ),
            active: customer
                .active
                .map(|active| active.to_string())
                .unwrap_or_default(),
        }
    }
}

impl ResultRow {
    fn cells(&self) -> [&str; 6] {
        [
            &self.customer_id,
            &self.user_id,
            &self.first_name,
            &self.last_name,
            &self.address,
            &self.active,
        ]
    }
}

/// Render rows as a padded plain-text table with a header line
pub fn render_table(rows: &[ResultRow]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths);

    for row in rows {
        push_line(&mut out, &row.cells(), &widths);
    }

    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
