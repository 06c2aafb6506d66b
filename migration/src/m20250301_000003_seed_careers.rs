use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::Careers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 预置专业数据，接口只读
        let careers = [
            (
                "Ingeniería en Sistemas Computacionales",
                "Desarrollo de software, redes y sistemas de información",
            ),
            (
                "Ingeniería Industrial",
                "Optimización de procesos productivos y logística",
            ),
            (
                "Ingeniería Electrónica",
                "Diseño de circuitos, sistemas embebidos y telecomunicaciones",
            ),
            (
                "Licenciatura en Administración",
                "Gestión de organizaciones, finanzas y recursos humanos",
            ),
            (
                "Ingeniería Mecatrónica",
                "Integración de mecánica, electrónica y control",
            ),
        ];

        for (name, description) in careers {
            let insert = Query::insert()
                .into_table(Careers::Table)
                .columns([Careers::Id, Careers::Name, Careers::Description])
                .values_panic([
                    uuid::Uuid::new_v4().to_string().into(),
                    name.into(),
                    description.into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete().from_table(Careers::Table).to_owned();
        manager.exec_stmt(delete).await?;
        Ok(())
    }
}
