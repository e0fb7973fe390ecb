use std::path::{Path, PathBuf};

use anyhow::Context;
use schemars::{
    gen::{SchemaGenerator, SchemaSettings},
    schema::RootSchema,
    JsonSchema,
};

use super::Cmd;

// -----------------------------------------------------------------------------
// Args
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Output directory of generated schemas
    #[clap(short = 'o', long = "outdir", default_value = "docs/schemas")]
    pub outdir: PathBuf,
}

impl Cmd for Args {
    fn run(&self) -> anyhow::Result<()> {
        write_schemas(&self.outdir)
    }
}

fn write_schemas(outdir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("Failed to create {}", outdir.display()))?;
    for item in schema_items() {
        log::info!("Generating schema for: {}", item.type_name());
        let path = outdir.join(format!("{}.json", item.file_stem()));
        let json = serde_json::to_string_pretty(&item.gen())?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// ISchemaItem
// -----------------------------------------------------------------------------
trait ISchemaItem {
    fn type_name(&self) -> &'static str;
    fn file_stem(&self) -> String;
    fn gen(&self) -> RootSchema;
}

struct SchemaItem<T>(std::marker::PhantomData<T>);

impl<T: 'static + JsonSchema> SchemaItem<T> {
    fn create() -> Box<dyn ISchemaItem> {
        Box::new(SchemaItem::<T>(std::marker::PhantomData))
    }
}

impl<T: JsonSchema> ISchemaItem for SchemaItem<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn file_stem(&self) -> String {
        T::schema_name()
    }

    fn gen(&self) -> RootSchema {
        let mut gen: SchemaGenerator = SchemaSettings::draft07()
            .with(|s| {
                s.option_add_null_type = false;
            })
            .into();
        gen.root_schema_for::<T>()
    }
}

// -----------------------------------------------------------------------------
// schema_items
// -----------------------------------------------------------------------------
fn schema_items() -> Vec<Box<dyn ISchemaItem>> {
    use cmhistory::adapter::{address, employment, ValidationReport};

    vec![
        SchemaItem::<cmhistory::CoveragePolicy>::create(),
        SchemaItem::<cmhistory::CoverageResult>::create(),
        SchemaItem::<employment::EmploymentSection>::create(),
        SchemaItem::<employment::EmploymentCoverage>::create(),
        SchemaItem::<address::AddressSection>::create(),
        SchemaItem::<address::AddressCoverage>::create(),
        SchemaItem::<ValidationReport>::create(),
    ]
}
