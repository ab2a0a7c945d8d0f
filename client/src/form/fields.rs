use common::students::StudentRecord;

pub const DEPARTMENTS: &[&str] = &[
    "Computer Science",
    "Information Technology",
    "Electronics",
    "Mechanical",
    "Civil",
    "Electrical",
];
pub const SECTIONS: &[&str] = &["A", "B", "C", "D"];
pub const YEARS: &[&str] = &["1", "2", "3", "4"];

/// The editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    RollNo,
    Email,
    Department,
    Year,
    Section,
    Phone,
    Address,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::RollNo,
        Field::Email,
        Field::Department,
        Field::Year,
        Field::Section,
        Field::Phone,
        Field::Address,
    ];

    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::RollNo => "rollNo",
            Field::Email => "email",
            Field::Department => "department",
            Field::Year => "year",
            Field::Section => "section",
            Field::Phone => "phone",
            Field::Address => "address",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::RollNo => "Roll Number",
            Field::Email => "Email",
            Field::Department => "Department",
            Field::Year => "Year",
            Field::Section => "Section",
            Field::Phone => "Phone",
            Field::Address => "Address",
        }
    }

    pub fn input(self) -> Input {
        match self {
            Field::Email => Input::Email,
            Field::Phone => Input::Tel,
            Field::Address => Input::TextArea,
            Field::Department => Input::Select {
                placeholder: "Select Department",
                options: DEPARTMENTS,
            },
            Field::Year => Input::Select {
                placeholder: "Select Year",
                options: YEARS,
            },
            Field::Section => Input::Select {
                placeholder: "Select Section",
                options: SECTIONS,
            },
            Field::Name | Field::RollNo => Input::Text,
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::Phone => Some("10 digit mobile number"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Text,
    Email,
    Tel,
    TextArea,
    /// A select whose first, empty option shows `placeholder`.
    Select {
        placeholder: &'static str,
        options: &'static [&'static str],
    },
}

/// Raw form values, exactly as typed or selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub department: String,
    pub year: String,
    pub section: String,
    pub phone: String,
    pub address: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::RollNo => &self.roll_no,
            Field::Email => &self.email,
            Field::Department => &self.department,
            Field::Year => &self.year,
            Field::Section => &self.section,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::RollNo => &mut self.roll_no,
            Field::Email => &mut self.email,
            Field::Department => &mut self.department,
            Field::Year => &mut self.year,
            Field::Section => &mut self.section,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
        };
        *slot = value.into();
    }
}

impl From<&StudentRecord> for FormData {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            roll_no: record.roll_no.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
            year: record.year.to_string(),
            section: record.section.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
        }
    }
}

/// Everything a renderer needs to draw one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: String,
    pub input: Input,
    pub value: String,
    pub disabled: bool,
    pub placeholder: Option<&'static str>,
    pub error: Option<String>,
}
